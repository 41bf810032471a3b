//! Message service
//!
//! Handles posting to the log and reading the part of it a caller may see.

use chrono::Utc;
use lobby_core::entities::{Message, MessageType};
use lobby_core::traits::MessageQuery;
use tracing::{info, instrument};

use crate::dto::{MessageResponse, SendMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a message from a registered participant
    ///
    /// The request is checked before the store is touched; a sender that is
    /// not in the registry is rejected with `UnknownSender`.
    #[instrument(skip(self, request), fields(to = %request.to))]
    pub async fn send(
        &self,
        sender: &str,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let kind = parse_client_type(&request.kind)?;
        if request.to.trim().is_empty() || request.text.trim().is_empty() {
            return Err(ServiceError::validation("to and text must not be blank"));
        }

        if self
            .ctx
            .participant_repo()
            .find_by_name(sender)
            .await?
            .is_none()
        {
            return Err(ServiceError::unknown_sender(sender));
        }

        let message = Message::new(sender, request.to, request.text, kind, Utc::now());
        self.ctx.message_repo().append(&message).await?;

        info!(kind = %message.kind, "Message posted");

        Ok(MessageResponse::from(message))
    }

    /// Messages visible to `identity`, oldest first
    ///
    /// With a `limit`, only the most recent `limit` of them are returned.
    /// A zero limit means no limit.
    #[instrument(skip(self))]
    pub async fn list_visible(
        &self,
        identity: Option<&str>,
        limit: Option<usize>,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let query = MessageQuery::new(identity.map(str::to_owned), limit.filter(|&l| l > 0));
        let messages = self.ctx.message_repo().find_visible(&query).await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }
}

fn parse_client_type(raw: &str) -> ServiceResult<MessageType> {
    match raw.parse::<MessageType>() {
        Ok(kind) if kind.is_client_sendable() => Ok(kind),
        Ok(kind) => Err(ServiceError::validation(format!(
            "type '{kind}' is reserved for system events"
        ))),
        Err(e) => Err(ServiceError::validation(e.to_string())),
    }
}
