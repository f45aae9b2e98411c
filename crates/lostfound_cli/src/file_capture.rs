use std::path::PathBuf;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lostfound_contract::{CaptureOptions, CaptureResult, CapturedImage};
use lostfound_ports::{CaptureError, ImageCaptureProvider};
use tracing::debug;

/// Treats a file on disk as the photo the user picked or took. With no file
/// the user is considered to have cancelled.
#[derive(Debug, Clone)]
pub struct FileImageCapture {
    image: Option<PathBuf>,
}

impl FileImageCapture {
    pub fn new(image: Option<PathBuf>) -> Self {
        Self { image }
    }

    async fn load(&self, options: &CaptureOptions) -> Result<CaptureResult, CaptureError> {
        let Some(path) = &self.image else {
            return Ok(CaptureResult::Cancelled);
        };

        let absolute = tokio::fs::canonicalize(path)
            .await
            .map_err(|err| CaptureError::Read {
                uri: path.display().to_string(),
                reason: err.to_string(),
            })?;
        let uri = format!("file://{}", absolute.display());
        let bytes = tokio::fs::read(&absolute)
            .await
            .map_err(|err| CaptureError::Read {
                uri: uri.clone(),
                reason: err.to_string(),
            })?;

        debug!(
            uri = %uri,
            bytes = bytes.len(),
            quality = options.quality,
            "image loaded from disk"
        );

        let encoded_data = if options.return_encoded_data {
            STANDARD.encode(&bytes)
        } else {
            String::new()
        };
        Ok(CaptureResult::Captured(CapturedImage { uri, encoded_data }))
    }
}

#[async_trait]
impl ImageCaptureProvider for FileImageCapture {
    async fn pick_from_library(
        &self,
        options: &CaptureOptions,
    ) -> Result<CaptureResult, CaptureError> {
        self.load(options).await
    }

    async fn capture_from_camera(
        &self,
        options: &CaptureOptions,
    ) -> Result<CaptureResult, CaptureError> {
        self.load(options).await
    }
}
