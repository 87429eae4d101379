//! Verification failure types.

use thiserror::Error;

/// Reasons a single verification request can fail.
///
/// Every variant carries the message returned to the client. Failures are
/// terminal for the request and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The request carried no usable upload.
    #[error("{0}")]
    MissingFile(String),
    /// Writing the upload to the object store failed.
    #[error("{0}")]
    Storage(String),
    /// The text recognizer reported an error.
    #[error("{0}")]
    Recognition(String),
}

impl VerifyError {
    /// Message used when the request has no `file` part.
    pub const NO_FILE_PART: &'static str = "No file part";

    /// Message used when the `file` part has an empty filename.
    pub const NO_SELECTED_FILE: &'static str = "No selected file";

    /// Creates the error for a request without a `file` part.
    pub fn no_file_part() -> Self {
        Self::MissingFile(Self::NO_FILE_PART.to_owned())
    }

    /// Creates the error for a `file` part with an empty filename.
    pub fn no_selected_file() -> Self {
        Self::MissingFile(Self::NO_SELECTED_FILE.to_owned())
    }

    /// Returns the message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            Self::MissingFile(message) | Self::Storage(message) | Self::Recognition(message) => {
                message
            }
        }
    }

    /// Returns `true` when the failure was caused by the client.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingFile(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let error = VerifyError::Storage("403 Forbidden: elvora".to_owned());
        assert_eq!(error.to_string(), "403 Forbidden: elvora");
        assert_eq!(error.message(), "403 Forbidden: elvora");
    }

    #[test]
    fn missing_file_messages() {
        assert_eq!(VerifyError::no_file_part().message(), "No file part");
        assert_eq!(VerifyError::no_selected_file().message(), "No selected file");
        assert!(VerifyError::no_file_part().is_client_error());
        assert!(!VerifyError::Recognition(String::new()).is_client_error());
    }
}
