//! Authentication credentials.

use std::path::Path;

use crate::Result;
use crate::auth::ServiceAccountKey;

/// Authentication credentials for the Vision API.
#[derive(Debug, Clone)]
pub enum VisionCredentials {
    /// Service-account key; requests carry an OAuth2 bearer token.
    ServiceAccount(ServiceAccountKey),
    /// API key, sent as the `key` query parameter.
    ApiKey(String),
    /// No authentication (for emulators and tests).
    None,
}

impl VisionCredentials {
    /// Create service-account credentials from a JSON key file.
    pub fn service_account_file(path: impl AsRef<Path>) -> Result<Self> {
        ServiceAccountKey::from_file(path).map(Self::ServiceAccount)
    }

    /// Create API key credentials.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    /// Create credentials with no authentication.
    pub fn none() -> Self {
        Self::None
    }

    /// Short name of the credential type, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServiceAccount(_) => "service_account",
            Self::ApiKey(_) => "api_key",
            Self::None => "none",
        }
    }
}
