use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// HTTP error response, serialized as `{"error": "<message>"}`.
///
/// The name and context never reach the client; they exist for logs and
/// tests.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier (not serialized in JSON)
    #[serde(skip)]
    pub name: Cow<'a, str>,
    /// Message shown to the client
    #[serde(rename = "error")]
    pub message: Cow<'a, str>,
    /// Internal context for debugging (not serialized in JSON)
    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "The uploaded file exceeds the maximum allowed size",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            context: None,
            status,
        }
    }

    /// Replaces the message with a custom one.
    ///
    /// Upstream error text is passed through as-is, so the message is never
    /// merged with the default.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_response_replaces_message() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_message("Bucket elvora does not exist")
            .with_message("Permission denied");

        assert_eq!(&response.message, "Permission denied");
    }

    #[test]
    fn error_response_merging_context() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("upload failed")
            .with_context("key ktp_file/a.jpg");

        assert_eq!(
            response.context.as_deref(),
            Some("upload failed; key ktp_file/a.jpg")
        );
    }

    #[test]
    fn error_response_serializes_only_the_message() {
        let response = ErrorResponse::BAD_REQUEST
            .with_message("No file part")
            .with_context("multipart body had no `file` part");

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({ "error": "No file part" }));
    }

    #[test]
    fn default_is_internal_server_error() {
        let response = ErrorResponse::default();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.name, "internal_server_error");
    }
}
