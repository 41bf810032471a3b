//! # lobby-core
//!
//! Domain layer containing the participant and message entities, the message
//! visibility rules, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    format_clock, Message, MessageType, MessageTypeParseError, Participant, ARRIVAL_TEXT,
    BROADCAST_RECIPIENT, DEPARTURE_TEXT,
};
pub use error::DomainError;
pub use traits::{MessageQuery, MessageRepository, ParticipantRepository, RepoResult};
