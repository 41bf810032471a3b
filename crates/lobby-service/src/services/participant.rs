//! Participant service
//!
//! Handles joining the room, heartbeats, and the roster.

use chrono::Utc;
use lobby_core::entities::{Message, Participant};
use tracing::{debug, info, instrument};

use crate::dto::{CreateParticipantRequest, ParticipantResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Participant service
pub struct ParticipantService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ParticipantService<'a> {
    /// Create a new ParticipantService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a participant and announce the arrival
    ///
    /// A taken name surfaces as a conflict from the store's uniqueness
    /// constraint, so two concurrent registrations cannot both succeed.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn register(
        &self,
        request: CreateParticipantRequest,
    ) -> ServiceResult<ParticipantResponse> {
        let now = Utc::now();
        let participant = Participant::new(request.name, now);
        let arrival = Message::arrival(&participant.name, now);

        self.ctx
            .participant_repo()
            .create(&participant, &arrival)
            .await?;

        info!(name = %participant.name, "Participant joined");

        Ok(ParticipantResponse::from(participant))
    }

    /// Record a heartbeat for a present participant
    #[instrument(skip(self))]
    pub async fn heartbeat(&self, name: &str) -> ServiceResult<()> {
        self.ctx.participant_repo().touch(name, Utc::now()).await?;
        debug!("Heartbeat recorded");
        Ok(())
    }

    /// List everyone currently in the room
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<ParticipantResponse>> {
        let participants = self.ctx.participant_repo().list().await?;
        Ok(participants
            .into_iter()
            .map(ParticipantResponse::from)
            .collect())
    }
}
