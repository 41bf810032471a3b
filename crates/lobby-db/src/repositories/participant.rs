//! PostgreSQL implementation of ParticipantRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use lobby_core::entities::{Message, Participant};
use lobby_core::traits::{ParticipantRepository, RepoResult};

use crate::models::ParticipantModel;

use super::error::{map_db_error, map_unique_violation, participant_exists, participant_not_found};
use super::message::insert_messages;

/// PostgreSQL implementation of ParticipantRepository
#[derive(Clone)]
pub struct PgParticipantRepository {
    pool: PgPool,
}

impl PgParticipantRepository {
    /// Create a new PgParticipantRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Participant>> {
        let result = sqlx::query_as::<_, ParticipantModel>(
            r#"
            SELECT name, last_seen
            FROM participants
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Participant::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Participant>> {
        let results = sqlx::query_as::<_, ParticipantModel>(
            r#"
            SELECT name, last_seen
            FROM participants
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Participant::from).collect())
    }

    #[instrument(skip(self, participant, arrival), fields(name = %participant.name))]
    async fn create(&self, participant: &Participant, arrival: &Message) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO participants (name, last_seen)
            VALUES ($1, $2)
            "#,
        )
        .bind(&participant.name)
        .bind(participant.last_seen)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || participant_exists(&participant.name)))?;

        insert_messages(&mut *tx, std::slice::from_ref(arrival))
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch(&self, name: &str, seen_at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE participants
            SET last_seen = $2
            WHERE name = $1
            "#,
        )
        .bind(name)
        .bind(seen_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(participant_not_found(name));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn evict_stale(
        &self,
        cutoff: DateTime<Utc>,
        departed_at: DateTime<Utc>,
    ) -> RepoResult<Vec<Participant>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Departures come only from rows this statement removed
        let removed = sqlx::query_as::<_, ParticipantModel>(
            r#"
            DELETE FROM participants
            WHERE last_seen <= $1
            RETURNING name, last_seen
            "#,
        )
        .bind(cutoff)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if removed.is_empty() {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(Vec::new());
        }

        let mut evicted: Vec<Participant> = removed.into_iter().map(Participant::from).collect();
        evicted.sort_by(|a, b| a.name.cmp(&b.name));

        let departures: Vec<Message> = evicted
            .iter()
            .map(|p| Message::departure(&p.name, departed_at))
            .collect();

        insert_messages(&mut *tx, &departures)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(count = evicted.len(), "Evicted stale participants");
        Ok(evicted)
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
