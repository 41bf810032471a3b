//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use lobby_core::entities::{Message, Participant};

use super::responses::{MessageResponse, ParticipantResponse};

impl From<&Participant> for ParticipantResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.name.clone(),
            last_seen: participant.last_seen_millis(),
        }
    }
}

impl From<Participant> for ParticipantResponse {
    fn from(participant: Participant) -> Self {
        Self {
            last_seen: participant.last_seen_millis(),
            name: participant.name,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            from: message.from,
            to: message.to,
            text: message.text,
            kind: message.kind.as_str().to_string(),
            time: message.time,
        }
    }
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self::from(message.clone())
    }
}
