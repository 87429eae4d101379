//! KTP verification handler.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::extract::Multipart;
use crate::handler::Result;
use crate::handler::response::VerificationResponse;
use crate::service::{ServiceState, VerificationService, VerifyError};

/// Tracing target for verification requests.
const TRACING_TARGET: &str = "ktp_server::handler::verify";

/// Name of the multipart part carrying the card image.
const FILE_PART: &str = "file";

/// Uploads a card image, recognizes its text and extracts the card fields.
#[tracing::instrument(skip_all)]
async fn verify_ktp(
    State(verification): State<VerificationService>,
    mut multipart: Multipart,
) -> Result<Json<VerificationResponse>> {
    let Some(upload) = multipart.file(FILE_PART).await? else {
        return Err(VerifyError::no_file_part().into());
    };

    tracing::info!(
        target: TRACING_TARGET,
        filename = %upload.filename,
        size = upload.data.len(),
        "verification requested"
    );

    let verification = verification
        .verify(&upload.filename, upload.data)
        .await?;

    Ok(Json(verification.into()))
}

/// Returns a [`Router`] with the verification route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/verify-ktp", post(verify_ktp))
}
