//! Message handlers
//!
//! Endpoints for posting to and reading the message log.

use axum::{extract::State, Json};
use lobby_service::dto::{MessageResponse, SendMessageRequest};
use lobby_service::MessageService;

use crate::extractors::{Identity, MessageLimit, OptionalIdentity, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Messages visible to the caller
///
/// GET /messages?limit=N
pub async fn get_messages(
    State(state): State<AppState>,
    OptionalIdentity(user): OptionalIdentity,
    MessageLimit(limit): MessageLimit,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let messages = service.list_visible(user.as_deref(), limit).await?;
    Ok(Json(messages))
}

/// Post a message as the caller
///
/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    Identity(user): Identity,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let message = service.send(&user, request).await?;
    Ok(Created(Json(message)))
}
