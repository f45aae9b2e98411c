pub mod capture;
pub mod host;
pub mod permission;
pub mod session;
pub mod store;

pub use capture::{CaptureError, CaptureSource, ImageCaptureProvider, ScriptedImageCapture};
pub use host::{FormHost, HostEvent, RecordingFormHost};
pub use permission::{PermissionProvider, PermissionResponse, StaticPermissions};
pub use session::{SessionProvider, SessionUser, StaticSession};
pub use store::{InMemoryLostItemStore, LostItemStore, StoreError, StoredLostItem};
