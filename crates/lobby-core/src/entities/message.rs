//! Message entity - one event in the room's message log

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};

/// Recipient value that makes a message visible to everyone
pub const BROADCAST_RECIPIENT: &str = "Todos";

/// Status text appended when a participant joins
pub const ARRIVAL_TEXT: &str = "joined";

/// Status text appended when a participant is evicted
pub const DEPARTURE_TEXT: &str = "left";

/// Kind of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// Public chat message
    Message,
    /// Message addressed to a single participant
    PrivateMessage,
    /// System arrival/departure event
    Status,
}

impl MessageType {
    /// Wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::PrivateMessage => "private_message",
            Self::Status => "status",
        }
    }

    /// Whether clients may post this type themselves.
    ///
    /// `status` entries are only produced by the registry and the sweeper.
    #[inline]
    pub const fn is_client_sendable(self) -> bool {
        matches!(self, Self::Message | Self::PrivateMessage)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a MessageType from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid message type: {0}")]
pub struct MessageTypeParseError(pub String);

impl FromStr for MessageType {
    type Err = MessageTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "private_message" => Ok(Self::PrivateMessage),
            "status" => Ok(Self::Status),
            other => Err(MessageTypeParseError(other.to_string())),
        }
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub text: String,
    pub kind: MessageType,
    /// Wall-clock time of insertion, `HH:MM:SS`
    pub time: String,
}

impl Message {
    /// Create a message stamped with the given instant
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
        kind: MessageType,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            kind,
            time: format_clock(&at),
        }
    }

    /// Status event announcing that `name` joined the room
    pub fn arrival(name: &str, at: DateTime<Utc>) -> Self {
        Self::new(name, BROADCAST_RECIPIENT, ARRIVAL_TEXT, MessageType::Status, at)
    }

    /// Status event announcing that `name` left the room
    pub fn departure(name: &str, at: DateTime<Utc>) -> Self {
        Self::new(name, BROADCAST_RECIPIENT, DEPARTURE_TEXT, MessageType::Status, at)
    }

    /// Check if the message is addressed to the whole room
    #[inline]
    pub fn is_broadcast(&self) -> bool {
        self.to == BROADCAST_RECIPIENT
    }

    /// Visibility rule for the message log.
    ///
    /// Public messages and broadcasts are visible to everyone; anything else
    /// only to its sender and recipient. Without an identity only the public
    /// part of the log is visible.
    pub fn is_visible_to(&self, identity: Option<&str>) -> bool {
        if self.kind == MessageType::Message || self.is_broadcast() {
            return true;
        }
        identity.is_some_and(|user| self.from == user || self.to == user)
    }
}

/// Format an instant as the log's `HH:MM:SS` clock string, in server local time
pub fn format_clock(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}
