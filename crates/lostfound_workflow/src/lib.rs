pub mod config;
pub mod draft;
pub mod form;
pub mod validation;

pub use config::{FormConfig, StoreFailurePolicy};
pub use draft::{LostItemDraft, SubmitPhase, ValidationErrors};
pub use form::{
    CaptureStatus, FormError, FormPorts, SubmitOutcome, UploadForm, CAMERA_DENIED_MESSAGE,
};
pub use validation::{
    validate_draft, IMAGE_MISSING_MESSAGE, MIN_FIELD_CHARS, TEXT_TOO_SHORT_MESSAGE,
};
