//! Convenient re-exports for common use.

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::extract::{KtpData, extract_ktp_data};
pub use crate::path::{DEFAULT_KEY_PREFIX, ObjectKey, secure_filename};
pub use crate::recognition::{BoxedTextRecognizer, TextRecognizer};
pub use crate::storage::{BoxedObjectStore, ObjectStore, StorageLocator};
