//! Liveness monitoring handler.
//!
//! The check reports that the server accepts requests. It never contacts the
//! object store or the Vision API.

use axum::routing::get;
use axum::{Json, Router};

use super::response::MonitorStatus;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "ktp_server::handler::monitors";

#[tracing::instrument(skip_all)]
async fn health_status() -> Json<MonitorStatus> {
    let response = MonitorStatus::default();

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy = response.is_healthy,
        "health status requested"
    );

    Json(response)
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
