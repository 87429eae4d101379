//! Verification error to HTTP error conversion.

use super::http_error::{Error as HttpError, ErrorKind};
use crate::service::VerifyError;

/// Tracing target for verification error conversions.
const TRACING_TARGET: &str = "ktp_server::handler::verify";

impl From<VerifyError> for HttpError<'static> {
    fn from(error: VerifyError) -> Self {
        let (kind, context) = match &error {
            VerifyError::MissingFile(_) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "rejected upload without a usable file"
                );
                (ErrorKind::BadRequest, "missing file")
            }
            VerifyError::Storage(_) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    "responding to storage failure"
                );
                (ErrorKind::InternalServerError, "storage upload failed")
            }
            VerifyError::Recognition(_) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    "responding to recognition failure"
                );
                (ErrorKind::InternalServerError, "text recognition failed")
            }
        };

        kind.with_context(context).with_message(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn missing_file_is_bad_request() {
        let error = HttpError::from(VerifyError::no_file_part());

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.message(), Some("No file part"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_are_internal_errors() {
        for error in [
            VerifyError::Storage("403 Forbidden".to_owned()),
            VerifyError::Recognition("Bad image data.".to_owned()),
        ] {
            let message = error.to_string();
            let error = HttpError::from(error);

            assert_eq!(error.kind(), ErrorKind::InternalServerError);
            assert_eq!(error.message(), Some(message.as_str()));
        }
    }
}
