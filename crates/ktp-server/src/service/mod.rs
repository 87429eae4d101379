//! Application state and dependency injection.

mod config;
mod error;
mod state;
mod verification;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::error::VerifyError;
pub use crate::service::state::ServiceState;
pub use crate::service::verification::{Verification, VerificationService};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};
