use std::collections::VecDeque;

use async_trait::async_trait;
use lostfound_contract::{CaptureOptions, CaptureResult};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("capture device unavailable")]
    Unavailable,
    #[error("failed to read image {uri}: {reason}")]
    Read { uri: String, reason: String },
    #[error("capture provider failure: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    Library,
    Camera,
}

#[async_trait]
pub trait ImageCaptureProvider: Send + Sync {
    async fn pick_from_library(&self, options: &CaptureOptions)
        -> Result<CaptureResult, CaptureError>;

    async fn capture_from_camera(
        &self,
        options: &CaptureOptions,
    ) -> Result<CaptureResult, CaptureError>;
}

/// Replays queued results in order and remembers every request it saw.
/// An empty queue behaves like the user backing out of the picker.
#[derive(Debug, Default)]
pub struct ScriptedImageCapture {
    queued: Mutex<VecDeque<Result<CaptureResult, CaptureError>>>,
    requests: Mutex<Vec<(CaptureSource, CaptureOptions)>>,
}

impl ScriptedImageCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, result: Result<CaptureResult, CaptureError>) {
        self.queued.lock().await.push_back(result);
    }

    pub async fn requests(&self) -> Vec<(CaptureSource, CaptureOptions)> {
        self.requests.lock().await.clone()
    }

    async fn next(
        &self,
        source: CaptureSource,
        options: &CaptureOptions,
    ) -> Result<CaptureResult, CaptureError> {
        self.requests.lock().await.push((source, options.clone()));
        let next = self.queued.lock().await.pop_front();
        debug!(source = ?source, scripted = next.is_some(), "scripted capture invoked");
        next.unwrap_or(Ok(CaptureResult::Cancelled))
    }
}

#[async_trait]
impl ImageCaptureProvider for ScriptedImageCapture {
    async fn pick_from_library(
        &self,
        options: &CaptureOptions,
    ) -> Result<CaptureResult, CaptureError> {
        self.next(CaptureSource::Library, options).await
    }

    async fn capture_from_camera(
        &self,
        options: &CaptureOptions,
    ) -> Result<CaptureResult, CaptureError> {
        self.next(CaptureSource::Camera, options).await
    }
}
