//! Error types for ktp-vision.

/// Result type for all Vision operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for Vision operations.
///
/// API-originated variants render the upstream message verbatim.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP client/connection errors.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors when sending or receiving data.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing errors.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Failed to sign the token request assertion.
    #[error("JWT signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Failed to read a credential file.
    #[error("Credential file error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-success HTTP response from the Vision API.
    #[error("{message}")]
    ApiError { status: u16, message: String },

    /// Per-image error reported inside a successful response.
    #[error("{message}")]
    Annotation { code: i32, message: String },

    /// Access token could not be obtained.
    #[error("Authentication failed: {reason}")]
    AuthError { reason: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Creates a new API error.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Creates a new annotation error.
    pub fn annotation(code: i32, message: impl Into<String>) -> Self {
        Self::Annotation {
            code,
            message: message.into(),
        }
    }

    /// Creates a new authentication error.
    pub fn auth_error(reason: impl Into<String>) -> Self {
        Self::AuthError {
            reason: reason.into(),
        }
    }

    /// Creates a new invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl From<Error> for ktp_core::Error {
    fn from(err: Error) -> Self {
        let error = match &err {
            Error::Http(_) => ktp_core::Error::network(),
            Error::Serialization(_) => ktp_core::Error::serialization(),
            Error::UrlParse(_) | Error::InvalidConfig { .. } | Error::Io(_) => {
                ktp_core::Error::configuration()
            }
            Error::Jwt(_) | Error::AuthError { .. } => ktp_core::Error::authentication(),
            Error::ApiError { .. } | Error::Annotation { .. } => ktp_core::Error::recognition(),
        };

        error.with_message(err.to_string()).with_source(err)
    }
}
