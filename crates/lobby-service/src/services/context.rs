//! Service context - dependency container for services
//!
//! Holds the registry and message log handles shared by every service.

use std::sync::Arc;

use lobby_core::traits::{MessageRepository, ParticipantRepository};
use lobby_db::{MemoryStore, PgMessageRepository, PgParticipantRepository, PgPool};

/// Service context containing all dependencies
///
/// Cloning is cheap: both repositories sit behind `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    participant_repo: Arc<dyn ParticipantRepository>,
    message_repo: Arc<dyn MessageRepository>,
    backend: &'static str,
}

impl ServiceContext {
    /// Create a new service context from repository handles
    pub fn new(
        participant_repo: Arc<dyn ParticipantRepository>,
        message_repo: Arc<dyn MessageRepository>,
        backend: &'static str,
    ) -> Self {
        Self {
            participant_repo,
            message_repo,
            backend,
        }
    }

    /// Context backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgParticipantRepository::new(pool.clone())),
            Arc::new(PgMessageRepository::new(pool)),
            "postgres",
        )
    }

    /// Context backed by one shared in-memory store
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self::new(Arc::new(store.clone()), Arc::new(store), "memory")
    }

    /// Get the participant registry
    pub fn participant_repo(&self) -> &dyn ParticipantRepository {
        self.participant_repo.as_ref()
    }

    /// Get the message log
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Name of the storage backend, for logs and health output
    pub fn backend(&self) -> &'static str {
        self.backend
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("backend", &self.backend)
            .field("repositories", &"...")
            .finish()
    }
}
