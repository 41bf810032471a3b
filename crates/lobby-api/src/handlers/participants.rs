//! Participant handlers
//!
//! Endpoints for joining the room and listing who is present.

use axum::{extract::State, Json};
use lobby_service::dto::{CreateParticipantRequest, ParticipantResponse};
use lobby_service::ParticipantService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List present participants
///
/// GET /participants
pub async fn list_participants(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ParticipantResponse>>> {
    let service = ParticipantService::new(state.service_context());
    let participants = service.list().await?;
    Ok(Json(participants))
}

/// Join the room
///
/// POST /participants
pub async fn create_participant(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateParticipantRequest>,
) -> ApiResult<Created<Json<ParticipantResponse>>> {
    let service = ParticipantService::new(state.service_context());
    let participant = service.register(request).await?;
    Ok(Created(Json(participant)))
}
