//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names follow
//! the wire format (`lastSeen`, `type`), not Rust naming.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Participant Responses
// ============================================================================

/// A present participant
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub name: String,
    /// Milliseconds since the Unix epoch
    pub last_seen: i64,
}

// ============================================================================
// Message Responses
// ============================================================================

/// One entry of the message log
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    pub backend: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool, backend: &str) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
                backend: backend.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
