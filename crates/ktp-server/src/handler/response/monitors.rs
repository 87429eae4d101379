//! Monitor response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Liveness status response.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// Whether the server is able to accept requests.
    pub is_healthy: bool,
    /// Timestamp when this status was generated.
    pub updated_at: Timestamp,
}

impl Default for MonitorStatus {
    fn default() -> Self {
        Self {
            is_healthy: true,
            updated_at: Timestamp::now(),
        }
    }
}
