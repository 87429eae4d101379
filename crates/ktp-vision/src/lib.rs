#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for Vision client operations.
///
/// Use this target for logging client initialization and annotate requests.
pub const TRACING_TARGET_CLIENT: &str = "ktp_vision::client";

/// Tracing target for access token acquisition.
pub const TRACING_TARGET_AUTH: &str = "ktp_vision::auth";

mod auth;
mod client;
pub mod error;
mod models;
#[doc(hidden)]
pub mod prelude;
mod provider;

pub use crate::auth::ServiceAccountKey;
pub use crate::client::{VisionClient, VisionConfig, VisionConfigBuilder, VisionCredentials};
pub use crate::error::{Error, Result};
