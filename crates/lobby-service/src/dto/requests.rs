//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use std::borrow::Cow;

use lobby_core::entities::MessageType;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Reject empty and whitespace-only strings
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Accept only the message types a client may send; `status` is reserved
fn client_message_type(value: &str) -> Result<(), ValidationError> {
    match value.parse::<MessageType>() {
        Ok(kind) if kind.is_client_sendable() => Ok(()),
        _ => Err(ValidationError::new("message_type")
            .with_message(Cow::Borrowed("type must be 'message' or 'private_message'"))),
    }
}

// ============================================================================
// Participant Requests
// ============================================================================

/// Join the room under a name
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParticipantRequest {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Name must be at most 100 characters")
    )]
    pub name: String,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Post a message; the sender comes from the `user` header
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(custom(function = "not_blank"))]
    pub to: String,

    #[validate(custom(function = "not_blank"))]
    pub text: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "client_message_type"))]
    pub kind: String,
}
