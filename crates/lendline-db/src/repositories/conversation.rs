//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use lendline_core::entities::Conversation;
use lendline_core::traits::{ConversationRepository, RepoResult};

use crate::models::ConversationModel;

use super::error::{conversation_not_found, map_db_error};

/// PostgreSQL implementation of ConversationRepository
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    /// Create a new PgConversationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r#"
            SELECT id, financing_request_id, lender_id, property_type, loan_amount,
                   last_message_at, last_message_preview, created_at
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self, preview))]
    async fn record_last_message(
        &self,
        id: i64,
        at: DateTime<Utc>,
        preview: &str,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE conversations
            SET last_message_at = $2, last_message_preview = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(at)
        .bind(preview)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(conversation_not_found(id));
        }

        Ok(())
    }
}
