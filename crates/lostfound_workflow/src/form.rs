use std::sync::Arc;

use chrono::Utc;
use lostfound_contract::{CaptureResult, LostItemRecord, MediaTypes};
use lostfound_ports::{
    CaptureError, CaptureSource, FormHost, ImageCaptureProvider, LostItemStore,
    PermissionProvider, SessionProvider, StoreError,
};
use thiserror::Error;
use tokio::{runtime::Handle, sync::RwLock};
use tracing::{debug, info, warn};

use crate::config::{FormConfig, StoreFailurePolicy};
use crate::draft::{LostItemDraft, SubmitPhase, ValidationErrors};
use crate::validation::validate_draft;

pub const CAMERA_DENIED_MESSAGE: &str = "You've denied the app access to your camera";

#[derive(Debug, Error)]
pub enum FormError {
    #[error("a lost item post is already in flight")]
    AlreadySubmitting,
    #[error("form was dismissed; open it again to post another item")]
    Closed,
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStatus {
    Captured,
    Cancelled,
    PermissionDenied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Rejected(ValidationErrors),
    Posted(LostItemRecord),
    PostFailed {
        record: LostItemRecord,
        error: StoreError,
        draft_kept: bool,
    },
}

/// Everything the form talks to outside itself.
#[derive(Clone)]
pub struct FormPorts {
    pub capture: Arc<dyn ImageCaptureProvider>,
    pub permissions: Arc<dyn PermissionProvider>,
    pub session: Arc<dyn SessionProvider>,
    pub store: Arc<dyn LostItemStore>,
    pub host: Arc<dyn FormHost>,
}

#[derive(Debug, Default)]
struct FormState {
    draft: LostItemDraft,
    phase: SubmitPhase,
}

impl FormState {
    fn release_abandoned_post(&mut self) {
        if self.phase == SubmitPhase::Submitting {
            self.phase = SubmitPhase::Idle;
            self.draft.is_submitting = false;
        }
    }
}

/// Armed while a post is in flight. Dropping it armed means the submit future
/// went away before the post settled, so the form goes back to `Idle` with the
/// draft intact.
struct InFlightPost {
    state: Arc<RwLock<FormState>>,
    armed: bool,
}

impl InFlightPost {
    fn arm(state: Arc<RwLock<FormState>>) -> Self {
        Self { state, armed: true }
    }

    fn settle(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightPost {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        warn!("lost item post abandoned before it settled; form back to idle");
        match self.state.try_write() {
            Ok(mut state) => state.release_abandoned_post(),
            Err(_) => {
                if let Ok(handle) = Handle::try_current() {
                    let state = self.state.clone();
                    handle.spawn(async move {
                        state.write().await.release_abandoned_post();
                    });
                }
            }
        }
    }
}

/// The "post a lost item" form. Clones share one draft.
///
/// Locks are never held across a collaborator call, so text edits and
/// captures stay possible while a post is outstanding. Anything captured
/// during that window is lost if the post settles with a reset.
#[derive(Clone)]
pub struct UploadForm {
    ports: FormPorts,
    config: Arc<FormConfig>,
    state: Arc<RwLock<FormState>>,
}

impl UploadForm {
    pub fn new(ports: FormPorts, mut config: FormConfig) -> Self {
        config.capture = config.capture.normalized();
        Self {
            ports,
            config: Arc::new(config),
            state: Arc::new(RwLock::new(FormState::default())),
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Starts a fresh form session with an empty draft and shows the form.
    pub async fn open(&self) -> Result<(), FormError> {
        {
            let mut state = self.state.write().await;
            if state.phase == SubmitPhase::Submitting {
                return Err(FormError::AlreadySubmitting);
            }
            *state = FormState::default();
        }
        self.ports.host.set_show_upload_form(true);
        Ok(())
    }

    /// Dismisses the form, leaving the draft as it is.
    pub fn close(&self) {
        self.ports.host.set_show_upload_form(false);
    }

    pub async fn set_title(&self, text: impl Into<String>) {
        self.state.write().await.draft.title = text.into();
    }

    pub async fn set_location(&self, text: impl Into<String>) {
        self.state.write().await.draft.location = text.into();
    }

    pub async fn draft(&self) -> LostItemDraft {
        self.state.read().await.draft.clone()
    }

    pub async fn phase(&self) -> SubmitPhase {
        self.state.read().await.phase
    }

    /// Picks a photo from the device library.
    pub async fn pick_image(&self) -> Result<CaptureStatus, FormError> {
        let options = self
            .config
            .capture
            .clone()
            .with_media_types(MediaTypes::All);
        let result = self.ports.capture.pick_from_library(&options).await?;
        Ok(self.apply_capture(CaptureSource::Library, result).await)
    }

    /// Takes a photo with the camera, asking for permission first.
    pub async fn capture_image(&self) -> Result<CaptureStatus, FormError> {
        let permission = self.ports.permissions.request_camera_permission().await;
        if !permission.granted {
            warn!("camera permission denied");
            self.ports.host.alert(CAMERA_DENIED_MESSAGE);
            return Ok(CaptureStatus::PermissionDenied);
        }

        let result = self
            .ports
            .capture
            .capture_from_camera(&self.config.capture)
            .await?;
        Ok(self.apply_capture(CaptureSource::Camera, result).await)
    }

    async fn apply_capture(&self, source: CaptureSource, result: CaptureResult) -> CaptureStatus {
        match result {
            CaptureResult::Cancelled => {
                debug!(source = ?source, "image capture cancelled");
                CaptureStatus::Cancelled
            }
            CaptureResult::Captured(image) => {
                info!(
                    source = ?source,
                    uri = %image.uri,
                    encoded_len = image.encoded_data.len(),
                    "image attached to lost item draft"
                );
                let mut state = self.state.write().await;
                state.draft.local_image = Some(image.uri);
                state.draft.encoded_image = image.encoded_data;
                CaptureStatus::Captured
            }
        }
    }

    /// Validates the draft and, if it passes, posts it.
    pub async fn submit(&self) -> Result<SubmitOutcome, FormError> {
        let (record, encoded_image) = {
            let mut state = self.state.write().await;
            match state.phase {
                SubmitPhase::Idle => {}
                SubmitPhase::Validating | SubmitPhase::Submitting => {
                    return Err(FormError::AlreadySubmitting)
                }
                SubmitPhase::Done => return Err(FormError::Closed),
            }

            state.phase = SubmitPhase::Validating;
            state.draft.errors = ValidationErrors::default();
            state.draft.submit_error = None;

            let errors = validate_draft(&state.draft);
            if !errors.is_empty() {
                info!(
                    title = !errors.title.is_empty(),
                    location = !errors.location.is_empty(),
                    image = !errors.image.is_empty(),
                    "lost item post rejected by validation"
                );
                state.draft.errors = errors.clone();
                state.phase = SubmitPhase::Idle;
                return Ok(SubmitOutcome::Rejected(errors));
            }

            state.phase = SubmitPhase::Submitting;
            state.draft.is_submitting = true;

            let finder = self.ports.session.finder_identity();
            let record = LostItemRecord::new_report(
                state.draft.title.clone(),
                state.draft.location.clone(),
                state.draft.local_image.clone().unwrap_or_default(),
                &finder,
                Utc::now(),
            );
            (record, state.draft.encoded_image.clone())
        };

        info!(id = %record.id, title = %record.title, "posting lost item");
        let in_flight = InFlightPost::arm(self.state.clone());
        let result = self
            .ports
            .store
            .create_lost_item(&record, &encoded_image)
            .await;

        let mut state = self.state.write().await;
        in_flight.settle();
        match (result, self.config.on_store_failure) {
            (Ok(()), _) => {
                state.draft.reset_after_submit();
                state.phase = SubmitPhase::Done;
                drop(state);

                info!(id = %record.id, "lost item posted");
                self.ports.host.set_show_upload_form(false);
                Ok(SubmitOutcome::Posted(record))
            }
            (Err(error), StoreFailurePolicy::CloseAnyway) => {
                state.draft.reset_after_submit();
                state.phase = SubmitPhase::Done;
                drop(state);

                warn!(id = %record.id, error = %error, "lost item post failed; closing form anyway");
                self.ports.host.set_show_upload_form(false);
                Ok(SubmitOutcome::PostFailed {
                    record,
                    error,
                    draft_kept: false,
                })
            }
            (Err(error), StoreFailurePolicy::KeepDraft) => {
                state.draft.is_submitting = false;
                state.draft.submit_error = Some(error.to_string());
                state.phase = SubmitPhase::Idle;
                drop(state);

                warn!(id = %record.id, error = %error, "lost item post failed; draft kept for retry");
                Ok(SubmitOutcome::PostFailed {
                    record,
                    error,
                    draft_kept: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lostfound_ports::{
        HostEvent, InMemoryLostItemStore, RecordingFormHost, ScriptedImageCapture,
        StaticPermissions, StaticSession,
    };

    use super::{FormError, FormPorts, UploadForm};
    use crate::config::FormConfig;
    use crate::draft::SubmitPhase;

    fn form(host: Arc<RecordingFormHost>) -> UploadForm {
        UploadForm::new(
            FormPorts {
                capture: Arc::new(ScriptedImageCapture::new()),
                permissions: Arc::new(StaticPermissions::new(true)),
                session: Arc::new(StaticSession::signed_out()),
                store: Arc::new(InMemoryLostItemStore::new()),
                host,
            },
            FormConfig::default(),
        )
    }

    #[tokio::test]
    async fn close_keeps_the_draft() {
        let host = Arc::new(RecordingFormHost::new());
        let form = form(host.clone());
        form.set_title("Backpack").await;

        form.close();

        assert_eq!(form.draft().await.title, "Backpack");
        assert_eq!(host.events(), vec![HostEvent::Visibility(false)]);
    }

    #[tokio::test]
    async fn open_starts_from_defaults() {
        let host = Arc::new(RecordingFormHost::new());
        let form = form(host.clone());
        form.set_title("Backpack").await;
        form.set_location("Gym").await;

        form.open().await.expect("open");

        let draft = form.draft().await;
        assert!(draft.title.is_empty());
        assert!(draft.location.is_empty());
        assert_eq!(form.phase().await, SubmitPhase::Idle);
        assert_eq!(host.visibility_changes(), vec![true]);
    }

    #[tokio::test]
    async fn capture_quality_is_normalized_on_construction() {
        let host = Arc::new(RecordingFormHost::new());
        let mut config = FormConfig::default();
        config.capture.quality = 7.5;
        let form = UploadForm::new(form(host).ports.clone(), config);

        assert_eq!(form.config().capture.quality, 1.0);
    }

    #[test]
    fn errors_render_for_users() {
        assert_eq!(
            FormError::AlreadySubmitting.to_string(),
            "a lost item post is already in flight"
        );
    }
}
