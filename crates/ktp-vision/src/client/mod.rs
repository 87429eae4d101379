//! Vision API client.
//!
//! This module provides the HTTP client for the `images:annotate` endpoint,
//! its configuration and the supported credential types.

mod credentials;
mod vision_client;
mod vision_config;

pub use credentials::VisionCredentials;
pub use vision_client::VisionClient;
pub use vision_config::{VisionConfig, VisionConfigBuilder};
