use serde::Serialize;

/// Per-field messages; an empty string means the field is fine.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: String,
    pub location: String,
    pub image: String,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.location.is_empty() && self.image.is_empty()
    }
}

/// Uncommitted form state for one form session.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct LostItemDraft {
    pub title: String,
    pub location: String,
    pub local_image: Option<String>,
    pub encoded_image: String,
    pub errors: ValidationErrors,
    pub is_submitting: bool,
    /// Set only when a post failed and the draft was kept for a retry.
    pub submit_error: Option<String>,
}

impl LostItemDraft {
    /// Clears what the user typed and picked after a post attempt settles.
    /// The encoded payload is left in place; the next capture overwrites it
    /// and validation only looks at `local_image`.
    pub(crate) fn reset_after_submit(&mut self) {
        self.is_submitting = false;
        self.title.clear();
        self.location.clear();
        self.local_image = None;
        self.submit_error = None;
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Done,
}
