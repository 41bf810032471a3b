//! Message entity <-> model mapper

use lobby_core::entities::{Message, MessageType};
use lobby_core::DomainError;

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
///
/// Fails only if the row holds a kind the CHECK constraint should have rejected.
impl TryFrom<MessageModel> for Message {
    type Error = DomainError;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        let kind = model
            .kind
            .parse::<MessageType>()
            .map_err(|e| DomainError::DatabaseError(format!("message {}: {e}", model.id)))?;

        Ok(Message {
            from: model.sender,
            to: model.recipient,
            text: model.text,
            kind,
            time: model.time,
        })
    }
}

/// Column-wise view of a slice of messages, bound as arrays to one
/// `INSERT ... SELECT FROM UNNEST(...)` statement
#[derive(Debug, Default)]
pub struct MessageBatch {
    pub senders: Vec<String>,
    pub recipients: Vec<String>,
    pub texts: Vec<String>,
    pub kinds: Vec<String>,
    pub times: Vec<String>,
}

impl MessageBatch {
    pub fn new(messages: &[Message]) -> Self {
        let mut batch = Self {
            senders: Vec::with_capacity(messages.len()),
            recipients: Vec::with_capacity(messages.len()),
            texts: Vec::with_capacity(messages.len()),
            kinds: Vec::with_capacity(messages.len()),
            times: Vec::with_capacity(messages.len()),
        };
        for message in messages {
            batch.senders.push(message.from.clone());
            batch.recipients.push(message.to.clone());
            batch.texts.push(message.text.clone());
            batch.kinds.push(message.kind.as_str().to_string());
            batch.times.push(message.time.clone());
        }
        batch
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
