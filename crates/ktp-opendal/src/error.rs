//! Storage error types.

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to initialize the storage backend.
    #[error("storage initialization failed: {0}")]
    Init(String),

    /// The configured backend was not compiled in.
    #[error("storage backend '{0}' is not enabled in this build")]
    Unsupported(String),

    /// Bucket or parent object not found.
    #[error("{0}")]
    NotFound(String),

    /// Credentials were rejected.
    #[error("{0}")]
    PermissionDenied(String),

    /// Backend-specific error.
    #[error(transparent)]
    Backend(opendal::Error),
}

impl StorageError {
    /// Creates a new initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Creates a new unsupported backend error.
    pub fn unsupported(backend: impl Into<String>) -> Self {
        Self::Unsupported(backend.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        use opendal::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            _ => Self::Backend(err),
        }
    }
}

impl From<StorageError> for ktp_core::Error {
    fn from(err: StorageError) -> Self {
        let error = match &err {
            StorageError::Init(_) | StorageError::Unsupported(_) => ktp_core::Error::configuration(),
            StorageError::PermissionDenied(_) => ktp_core::Error::authentication(),
            StorageError::NotFound(_) | StorageError::Backend(_) => ktp_core::Error::storage(),
        };

        error.with_message(err.to_string()).with_source(err)
    }
}
