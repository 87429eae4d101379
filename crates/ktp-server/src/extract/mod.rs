//! Request extractors with JSON error responses.
//!
//! Rejections are converted into the handler [`Error`] type, so a malformed
//! request gets the same `{"error": ...}` body as any other failure.
//!
//! [`Error`]: crate::handler::Error

mod multipart;

pub use crate::extract::multipart::{FileUpload, Multipart};
