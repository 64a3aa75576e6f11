//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lendline_core::entities::{Message, NewMessage};
use lendline_core::traits::{MessageQuery, MessageRepository, RepoResult};

use crate::mappers::MessageInsert;
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

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, conversation_id, sender_type, sender_id, sender_email, message_text,
                   message_html, is_email_origin, email_message_id, is_read, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_by_conversation(
        &self,
        conversation_id: i64,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let limit = query.limit.clamp(1, 100);

        let results = match (query.before, query.after) {
            (Some(before), None) => {
                // Fetch messages before cursor (scrolling up)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, sender_type, sender_id, sender_email, message_text,
                           message_html, is_email_origin, email_message_id, is_read, created_at
                    FROM messages
                    WHERE conversation_id = $1 AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    "#,
                )
                .bind(conversation_id)
                .bind(before)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(after)) => {
                // Fetch messages after cursor (scrolling down)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, sender_type, sender_id, sender_email, message_text,
                           message_html, is_email_origin, email_message_id, is_read, created_at
                    FROM messages
                    WHERE conversation_id = $1 AND id > $2
                    ORDER BY id ASC
                    LIMIT $3
                    "#,
                )
                .bind(conversation_id)
                .bind(after)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                // Fetch latest messages (no cursor)
                sqlx::query_as::<_, MessageModel>(
                    r#"
                    SELECT id, conversation_id, sender_type, sender_id, sender_email, message_text,
                           message_html, is_email_origin, email_message_id, is_read, created_at
                    FROM messages
                    WHERE conversation_id = $1
                    ORDER BY id DESC
                    LIMIT $2
                    "#,
                )
                .bind(conversation_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_email_message_id(
        &self,
        conversation_id: i64,
        email_message_id: &str,
    ) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, conversation_id, sender_type, sender_id, sender_email, message_text,
                   message_html, is_email_origin, email_message_id, is_read, created_at
            FROM messages
            WHERE conversation_id = $1 AND email_message_id = $2
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(conversation_id)
        .bind(email_message_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self, message))]
    async fn create(&self, message: &NewMessage) -> RepoResult<Message> {
        let insert = MessageInsert::new(message);

        let created = sqlx::query_as::<_, MessageModel>(
            r#"
            INSERT INTO messages (conversation_id, sender_type, sender_id, sender_email,
                                  message_text, message_html, is_email_origin,
                                  email_message_id, is_read)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
            RETURNING id, conversation_id, sender_type, sender_id, sender_email, message_text,
                      message_html, is_email_origin, email_message_id, is_read, created_at
            "#,
        )
        .bind(insert.conversation_id)
        .bind(insert.sender_type)
        .bind(insert.sender_id)
        .bind(insert.sender_email)
        .bind(insert.message_text)
        .bind(insert.message_html)
        .bind(insert.is_email_origin)
        .bind(insert.email_message_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Message::from(created))
    }
}
