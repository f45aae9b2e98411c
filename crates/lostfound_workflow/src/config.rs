use lostfound_contract::CaptureOptions;
use serde::{Deserialize, Serialize};

/// What the form does when the backend rejects a post.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreFailurePolicy {
    /// Reset and dismiss exactly as after a successful post.
    #[default]
    CloseAnyway,
    /// Keep the draft and the form open so the user can post again.
    KeepDraft,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    pub capture: CaptureOptions,
    pub on_store_failure: StoreFailurePolicy,
}
