//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines the two capabilities it needs, the participant
//! registry and the message log, and the infrastructure layer provides the
//! implementation. Implementations own their concurrency safety: every method
//! is atomic on its own, and no atomicity across calls is promised unless a
//! method says so.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Message, Participant};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Participant Repository
// ============================================================================

#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Find participant by name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Participant>>;

    /// List all present participants
    async fn list(&self) -> RepoResult<Vec<Participant>>;

    /// Register a participant and append its arrival event atomically.
    ///
    /// Fails with `ParticipantAlreadyExists` if the name is taken; in that
    /// case the arrival event is not written either.
    async fn create(&self, participant: &Participant, arrival: &Message) -> RepoResult<()>;

    /// Set the last-seen time of an existing participant
    ///
    /// Fails with `ParticipantNotFound` if the name is absent.
    async fn touch(&self, name: &str, seen_at: DateTime<Utc>) -> RepoResult<()>;

    /// Evict every participant with `last_seen <= cutoff` and append one
    /// departure event per evicted participant, atomically.
    ///
    /// Departure events are built only for rows this call removed, so
    /// re-running with the same cutoff is a no-op.
    async fn evict_stale(
        &self,
        cutoff: DateTime<Utc>,
        departed_at: DateTime<Utc>,
    ) -> RepoResult<Vec<Participant>>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Visibility query over the message log
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Requesting participant, if any
    pub identity: Option<String>,
    /// Keep only the last `limit` visible messages
    pub limit: Option<usize>,
}

impl MessageQuery {
    /// Create a query for an identity with an optional suffix limit
    pub fn new(identity: Option<String>, limit: Option<usize>) -> Self {
        Self { identity, limit }
    }

    /// Apply the query to an insertion-ordered log
    pub fn apply<'a, I>(&self, log: I) -> Vec<Message>
    where
        I: IntoIterator<Item = &'a Message>,
    {
        let identity = self.identity.as_deref();
        let mut visible: Vec<Message> = log
            .into_iter()
            .filter(|m| m.is_visible_to(identity))
            .cloned()
            .collect();

        if let Some(limit) = self.limit {
            let skip = visible.len().saturating_sub(limit);
            visible.drain(..skip);
        }
        visible
    }
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message to the log
    async fn append(&self, message: &Message) -> RepoResult<()>;

    /// Messages visible to the query identity, in insertion order
    async fn find_visible(&self, query: &MessageQuery) -> RepoResult<Vec<Message>>;

    /// Total number of entries in the log
    async fn count(&self) -> RepoResult<u64>;
}
