//! Multipart extractor with improved error handling.

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{FromRequest, Multipart as AxumMultipart, Request};
use axum::http::StatusCode;
use bytes::Bytes;
use derive_more::{Deref, DerefMut, From};

use crate::handler::{Error, ErrorKind};

/// Multipart extractor with improved error handling.
///
/// Wraps [`axum::extract::Multipart`] and rejects with a JSON `400` instead
/// of a plain-text body.
#[must_use]
#[derive(Debug, Deref, DerefMut, From)]
pub struct Multipart(pub AxumMultipart);

/// A file part read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Client-supplied filename, possibly empty.
    pub filename: String,
    /// Raw part contents.
    pub data: Bytes,
}

impl Multipart {
    /// Returns the inner Axum Multipart extractor.
    #[inline]
    pub fn into_inner(self) -> AxumMultipart {
        self.0
    }

    /// Reads the first file part named `name`.
    ///
    /// A part only counts as a file when its `Content-Disposition` carries a
    /// `filename` parameter, even an empty one. Parts before the match are
    /// skipped; parts after it are never read.
    pub async fn file(&mut self, name: &str) -> Result<Option<FileUpload>, Error<'static>> {
        while let Some(field) = self.0.next_field().await.map_err(field_error)? {
            if field.name() != Some(name) {
                continue;
            }

            let Some(filename) = field.file_name().map(str::to_owned) else {
                continue;
            };

            let data = read_field(field).await?;
            return Ok(Some(FileUpload { filename, data }));
        }

        Ok(None)
    }
}

async fn read_field(field: Field<'_>) -> Result<Bytes, Error<'static>> {
    field.bytes().await.map_err(field_error)
}

fn field_error(error: MultipartError) -> Error<'static> {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ErrorKind::PayloadTooLarge.with_context(error.body_text());
    }

    ErrorKind::BadRequest
        .with_message("Invalid multipart request")
        .with_context(format!("Multipart parsing failed: {}", error.body_text()))
}

impl<S> FromRequest<S> for Multipart
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumMultipart::from_request(req, state)
            .await
            .map(Multipart)
            .map_err(Into::into)
    }
}

impl From<MultipartRejection> for Error<'static> {
    fn from(rejection: MultipartRejection) -> Self {
        match rejection {
            MultipartRejection::InvalidBoundary(_) => ErrorKind::BadRequest
                .with_message("Invalid multipart boundary")
                .with_context(
                    "The Content-Type header is missing or has an invalid boundary parameter. \
                     Ensure the request uses 'multipart/form-data' with a valid boundary.",
                ),
            _ => ErrorKind::BadRequest
                .with_message("Invalid multipart request")
                .with_context(format!("Multipart parsing failed: {}", rejection)),
        }
    }
}
