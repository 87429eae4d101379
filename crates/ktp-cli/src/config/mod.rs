//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # Host, port, TLS, shutdown
//! ├── middleware: MiddlewareConfig # CORS, body limit, request timeout
//! ├── service: ServiceConfig       # Storage backend, bucket, Vision
//! └── mock: MockConfig             # Mock gateways (feature-gated)
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Store uploads in a local directory
//! ktp-cli --storage-backend fs --storage-root ./data --port 8080
//!
//! # Or via environment variables
//! KTP_STORAGE_BACKEND=fs KTP_STORAGE_ROOT=./data PORT=8080 ktp-cli
//! ```

mod logging;
mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use ktp_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
pub use logging::LogFormat;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
///
/// Combines all configuration groups for the verification server:
/// - [`ServerConfig`]: Network binding and TLS
/// - [`MiddlewareConfig`]: HTTP middleware (CORS, body limit, recovery)
/// - [`ServiceConfig`]: Object storage and the Vision client
/// - `MockConfig`: Mock gateways (feature-gated)
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "ktp")]
#[command(about = "KTP identity card verification server")]
#[command(version)]
pub struct Cli {
    /// Log line format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    #[serde(default)]
    pub log_format: LogFormat,

    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, body limit, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Storage and recognition configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Mock configuration for storage and recognition.
    #[cfg(feature = "mock")]
    #[clap(flatten)]
    pub mock: ktp_test::MockConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so that clap picks its values up as
    /// environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing in the configured format with `RUST_LOG` filtering.
    pub fn init_tracing(&self) -> anyhow::Result<()> {
        logging::init_tracing(self.log_format)
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            backend = %self.service.storage.backend,
            bucket = %self.service.storage.bucket,
            key_prefix = %self.service.key_prefix,
            vision_api_key = self.service.vision_api_key.is_some(),
            vision_timeout_secs = ?self.service.vision_timeout_secs,
            "Service configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "tls").then_some("tls"),
            cfg!(feature = "dotenv").then_some("dotenv"),
            cfg!(feature = "mock").then_some("mock"),
            cfg!(feature = "gcs").then_some("gcs"),
            cfg!(feature = "s3").then_some("s3"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
