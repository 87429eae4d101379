//! Convenient re-exports for building and serving the router.

pub use crate::handler::routes;
pub use crate::middleware::{
    BodyLimitConfig, CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt,
    RouterSecurityExt,
};
pub use crate::service::{ServiceConfig, ServiceState, VerificationService};
