//! Prelude module for convenient imports.

pub use crate::auth::ServiceAccountKey;
pub use crate::client::{VisionClient, VisionConfig, VisionConfigBuilder, VisionCredentials};
pub use crate::error::{Error, Result};
