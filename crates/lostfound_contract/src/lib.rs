pub mod capture;
pub mod codec;
pub mod record;

pub use capture::{AspectRatio, CaptureOptions, CaptureResult, CapturedImage, MediaTypes};
pub use codec::{decode_canonical, encode_canonical, CodecError};
pub use record::{FinderIdentity, LostItemRecord, RecordId};
