//! Server error types.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Errors raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Runtime server error.
    #[error("Runtime error: {0}")]
    Runtime(#[source] io::Error),

    /// TLS configuration error.
    #[error("TLS certificate error: {0}")]
    #[cfg_attr(not(feature = "tls"), allow(dead_code))]
    TlsCertificate(String),
}

impl ServerError {
    /// Creates a bind error with address context.
    pub fn bind(address: impl ToString, source: io::Error) -> Self {
        Self::Bind {
            address: address.to_string(),
            source,
        }
    }

    /// Returns the underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Bind { source, .. } => Some(source),
            Self::Runtime(source) => Some(source),
            Self::TlsCertificate(_) => None,
        }
    }

    /// Provides a human-readable suggestion for resolving the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        if let Self::TlsCertificate(_) = self {
            return Some("Check that certificate files exist and are in PEM format");
        }

        match self.io_error()?.kind() {
            io::ErrorKind::PermissionDenied => {
                Some("Try using a port above 1024 or run with appropriate privileges")
            }
            io::ErrorKind::AddrInUse => {
                Some("The port is already in use. Try a different port or stop the conflicting service")
            }
            io::ErrorKind::AddrNotAvailable => {
                Some("The address is not available. Check network interface configuration")
            }
            io::ErrorKind::NotFound => Some("Check that the required files exist"),
            io::ErrorKind::InvalidData => {
                Some("Check that certificate files are in correct PEM format")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_error_keeps_address() {
        let err = ServerError::bind(
            "127.0.0.1:5000",
            io::Error::new(io::ErrorKind::AddrInUse, "address in use"),
        );

        assert!(err.to_string().contains("127.0.0.1:5000"));
        assert!(err.suggestion().unwrap().contains("already in use"));
    }

    #[test]
    fn unknown_io_errors_have_no_suggestion() {
        let err = ServerError::Runtime(io::Error::other("boom"));
        assert!(err.suggestion().is_none());
        assert!(err.io_error().is_some());
    }

    #[test]
    fn tls_errors_suggest_checking_files() {
        let err = ServerError::TlsCertificate("missing".to_owned());
        assert!(err.io_error().is_none());
        assert!(err.suggestion().is_some());
    }
}
