use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    pub const LANDSCAPE_4_3: AspectRatio = AspectRatio {
        width: 4,
        height: 3,
    };
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::LANDSCAPE_4_3
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaTypes {
    #[default]
    Images,
    Videos,
    All,
}

/// Options passed to the library picker and the camera.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaptureOptions {
    pub allow_editing: bool,
    pub aspect: AspectRatio,
    /// Lossy compression quality, `0.0..=1.0`.
    pub quality: f32,
    pub media_types: MediaTypes,
    pub return_encoded_data: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            allow_editing: true,
            aspect: AspectRatio::LANDSCAPE_4_3,
            quality: 0.5,
            media_types: MediaTypes::Images,
            return_encoded_data: true,
        }
    }
}

impl CaptureOptions {
    pub fn with_media_types(mut self, media_types: MediaTypes) -> Self {
        self.media_types = media_types;
        self
    }

    pub fn normalized(mut self) -> Self {
        self.quality = if self.quality.is_nan() {
            CaptureOptions::default().quality
        } else {
            self.quality.clamp(0.0, 1.0)
        };
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapturedImage {
    pub uri: String,
    pub encoded_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureResult {
    Cancelled,
    Captured(CapturedImage),
}
