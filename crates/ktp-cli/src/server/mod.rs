//! HTTP/HTTPS server startup with graceful shutdown.
//!
//! The protocol is picked at compile time: HTTPS with the `tls` feature,
//! plain HTTP otherwise.

#[cfg(not(feature = "tls"))]
mod http_server;
#[cfg(feature = "tls")]
mod https_server;

mod error;
mod lifecycle;
mod shutdown;

use axum::Router;
pub use error::{ServerError, ServerResult};
use shutdown::shutdown_signal;

use crate::config::ServerConfig;

/// Starts a server with automatic protocol selection (HTTP/HTTPS).
///
/// # Errors
///
/// Returns an error if:
/// - TLS certificates cannot be loaded (HTTPS mode)
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    #[cfg(feature = "tls")]
    {
        https_server::serve_https(app, config).await
    }

    #[cfg(not(feature = "tls"))]
    {
        http_server::serve_http(app, config).await
    }
}
