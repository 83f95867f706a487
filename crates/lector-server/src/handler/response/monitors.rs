//! Health check response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Service health as last probed.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Whether the database answered the last probe.
    pub is_healthy: bool,
    /// Timestamp of the last probe.
    pub checked_at: Timestamp,
}
