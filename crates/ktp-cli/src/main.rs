#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use ktp_server::handler::routes;
use ktp_server::middleware::{RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt};
use ktp_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "ktp_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "ktp_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "ktp_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    cli.init_tracing()?;
    cli.log();
    cli.validate()?;

    let state = create_service_state(&cli).context("failed to create service state")?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the service state with the mock gateways.
#[cfg(feature = "mock")]
fn create_service_state(cli: &Cli) -> anyhow::Result<ServiceState> {
    let (storage, recognizer) = ktp_test::create_mock_gateways(cli.mock.clone());

    tracing::warn!(
        target: TRACING_TARGET_SERVER_STARTUP,
        "serving with mock storage and recognizer"
    );

    Ok(ServiceState::new(
        storage,
        recognizer,
        cli.service.key_prefix.as_str(),
    ))
}

/// Creates the service state from the storage and Vision configuration.
#[cfg(not(feature = "mock"))]
fn create_service_state(cli: &Cli) -> anyhow::Result<ServiceState> {
    Ok(ServiceState::from_config(&cli.service)?)
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces the optional timeout
/// 2. Observability - request IDs and tracing spans
/// 3. Security - CORS, security headers, body limit
/// 4. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_security(&middleware.cors, &middleware.body_limit)
        .with_observability()
        .with_recovery(&middleware.recovery)
        .with_state(state)
}

