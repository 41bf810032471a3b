//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;

use lobby_core::entities::{Message, BROADCAST_RECIPIENT};
use lobby_core::traits::{MessageQuery, MessageRepository, RepoResult};

use crate::mappers::MessageBatch;
use crate::models::MessageModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert messages in slice order with a single statement.
///
/// Generic over the executor so the participant repository can reuse it
/// inside its own transactions.
pub(crate) async fn insert_messages<'e, E>(executor: E, messages: &[Message]) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let batch = MessageBatch::new(messages);
    if batch.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO messages (sender, recipient, text, kind, time)
        SELECT sender, recipient, text, kind, time
        FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[], $5::text[])
            WITH ORDINALITY AS batch(sender, recipient, text, kind, time, ord)
        ORDER BY ord
        "#,
    )
    .bind(batch.senders)
    .bind(batch.recipients)
    .bind(batch.texts)
    .bind(batch.kinds)
    .bind(batch.times)
    .execute(executor)
    .await?;

    Ok(())
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn append(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (sender, recipient, text, kind, time)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&message.from)
        .bind(&message.to)
        .bind(&message.text)
        .bind(message.kind.as_str())
        .bind(&message.time)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_visible(&self, query: &MessageQuery) -> RepoResult<Vec<Message>> {
        // Newest `limit` rows first, then flipped back to insertion order.
        // LIMIT NULL means no limit.
        let limit = query.limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));

        let rows = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, sender, recipient, text, kind, time
            FROM (
                SELECT id, sender, recipient, text, kind, time
                FROM messages
                WHERE kind = 'message'
                   OR recipient = $1
                   OR ($2::text IS NOT NULL AND (sender = $2 OR recipient = $2))
                ORDER BY id DESC
                LIMIT $3
            ) AS recent
            ORDER BY id ASC
            "#,
        )
        .bind(BROADCAST_RECIPIENT)
        .bind(query.identity.as_deref())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Message::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}
