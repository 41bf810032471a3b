//! Heartbeat handler

use axum::{extract::State, http::StatusCode};
use lobby_service::ParticipantService;

use crate::extractors::Identity;
use crate::response::ApiResult;
use crate::state::AppState;

/// Keep the caller in the room
///
/// POST /status
pub async fn heartbeat(State(state): State<AppState>, Identity(user): Identity) -> ApiResult<StatusCode> {
    ParticipantService::new(state.service_context())
        .heartbeat(&user)
        .await?;
    Ok(StatusCode::OK)
}
