//! Domain entities - core business objects

mod message;
mod participant;

pub use message::{
    format_clock, Message, MessageType, MessageTypeParseError, ARRIVAL_TEXT, BROADCAST_RECIPIENT,
    DEPARTURE_TEXT,
};
pub use participant::Participant;
