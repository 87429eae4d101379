//! Response types for HTTP handlers.

mod error_response;
mod monitors;
mod verification;

pub use error_response::ErrorResponse;
pub use monitors::MonitorStatus;
pub use verification::VerificationResponse;
