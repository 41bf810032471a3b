//! Test fixtures and data generators
//!
//! Provides reusable request and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Join request
#[derive(Debug, Serialize)]
pub struct JoinRequest {
    pub name: String,
}

impl JoinRequest {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn unique() -> Self {
        Self {
            name: format!("guest{}", unique_suffix()),
        }
    }
}

/// Message request
#[derive(Debug, Serialize)]
pub struct MessageRequest {
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl MessageRequest {
    /// Public message to the whole room
    pub fn broadcast(text: &str) -> Self {
        Self {
            to: "Todos".to_string(),
            text: text.to_string(),
            kind: "message".to_string(),
        }
    }

    /// Private message to one participant
    pub fn private(to: &str, text: &str) -> Self {
        Self {
            to: to.to_string(),
            text: text.to_string(),
            kind: "private_message".to_string(),
        }
    }

    pub fn with_type(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }
}

/// Participant response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub name: String,
    pub last_seen: i64,
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
