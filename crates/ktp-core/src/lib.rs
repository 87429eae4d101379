#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for field extraction.
pub const TRACING_TARGET_EXTRACT: &str = "ktp_core::extract";

/// Tracing target for filename and object key handling.
pub const TRACING_TARGET_PATH: &str = "ktp_core::path";

mod error;
mod recognition;
mod storage;

pub mod extract;
pub mod path;
#[doc(hidden)]
pub mod prelude;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::extract::{KtpData, extract_ktp_data};
pub use crate::path::{DEFAULT_KEY_PREFIX, ObjectKey, secure_filename};
pub use crate::recognition::{BoxedTextRecognizer, TextRecognizer};
pub use crate::storage::{BoxedObjectStore, ObjectStore, StorageLocator};
