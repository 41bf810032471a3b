//! Route definitions
//!
//! Room routes are mounted at the root, as the web client expects.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, messages, participants, status};
use crate::state::AppState;

/// Create the room router (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/participants",
            get(participants::list_participants).post(participants::create_participant),
        )
        .route(
            "/messages",
            get(messages::get_messages).post(messages::create_message),
        )
        .route("/status", post(status::heartbeat))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
