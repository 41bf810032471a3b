//! In-memory store backing both repository traits
//!
//! The registry and the log share one mutex, so `create` and `evict_stale`
//! are atomic with respect to every other operation on the same store.
//! Nothing survives a restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

use lobby_core::entities::{Message, Participant};
use lobby_core::traits::{MessageQuery, MessageRepository, ParticipantRepository, RepoResult};

use crate::repositories::error::{participant_exists, participant_not_found};

#[derive(Debug, Default)]
struct Inner {
    participants: BTreeMap<String, Participant>,
    messages: Vec<Message>,
}

/// Registry and message log kept in process memory
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantRepository for MemoryStore {
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Participant>> {
        Ok(self.inner.lock().participants.get(name).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Participant>> {
        Ok(self.inner.lock().participants.values().cloned().collect())
    }

    async fn create(&self, participant: &Participant, arrival: &Message) -> RepoResult<()> {
        let mut inner = self.inner.lock();
        if inner.participants.contains_key(&participant.name) {
            return Err(participant_exists(&participant.name));
        }
        inner
            .participants
            .insert(participant.name.clone(), participant.clone());
        inner.messages.push(arrival.clone());
        Ok(())
    }

    async fn touch(&self, name: &str, seen_at: DateTime<Utc>) -> RepoResult<()> {
        let mut inner = self.inner.lock();
        match inner.participants.get_mut(name) {
            Some(participant) => {
                participant.touch(seen_at);
                Ok(())
            }
            None => Err(participant_not_found(name)),
        }
    }

    async fn evict_stale(
        &self,
        cutoff: DateTime<Utc>,
        departed_at: DateTime<Utc>,
    ) -> RepoResult<Vec<Participant>> {
        let mut inner = self.inner.lock();

        let stale: Vec<String> = inner
            .participants
            .values()
            .filter(|p| p.is_stale(cutoff))
            .map(|p| p.name.clone())
            .collect();

        // BTreeMap iteration is name-ordered, so departures are too.
        let mut evicted = Vec::with_capacity(stale.len());
        for name in stale {
            if let Some(participant) = inner.participants.remove(&name) {
                inner.messages.push(Message::departure(&name, departed_at));
                evicted.push(participant);
            }
        }

        if !evicted.is_empty() {
            debug!(count = evicted.len(), "Evicted stale participants");
        }
        Ok(evicted)
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn append(&self, message: &Message) -> RepoResult<()> {
        self.inner.lock().messages.push(message.clone());
        Ok(())
    }

    async fn find_visible(&self, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        Ok(query.apply(&self.inner.lock().messages))
    }

    async fn count(&self) -> RepoResult<u64> {
        Ok(self.inner.lock().messages.len() as u64)
    }
}
