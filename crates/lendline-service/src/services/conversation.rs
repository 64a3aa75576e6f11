//! Conversation service
//!
//! Read-side queries over conversations and their messages.

use tracing::instrument;

use lendline_core::traits::MessageQuery;

use crate::dto::responses::MessageResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get messages in a conversation with pagination
    #[instrument(skip(self))]
    pub async fn get_messages(
        &self,
        conversation_id: i64,
        before: Option<i64>,
        after: Option<i64>,
        limit: i64,
    ) -> ServiceResult<Vec<MessageResponse>> {
        // Verify the conversation exists so an unknown id is a 404, not an
        // empty list
        self.ctx
            .conversation_repo()
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", conversation_id.to_string()))?;

        let query = MessageQuery {
            before,
            after,
            limit: limit.min(100), // Cap at 100
        };

        let messages = self
            .ctx
            .message_repo()
            .find_by_conversation(conversation_id, query)
            .await?;

        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }
}
