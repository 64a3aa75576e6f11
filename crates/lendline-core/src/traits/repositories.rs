//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Conversation, FinancingRequest, Lender, Message, NewMessage, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Conversation>>;

    /// Record the latest message activity (timestamp and truncated preview)
    async fn record_last_message(
        &self,
        id: i64,
        at: DateTime<Utc>,
        preview: &str,
    ) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Pagination options for message queries
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    pub before: Option<i64>,
    pub after: Option<i64>,
    pub limit: i64,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Message>>;

    /// List messages in a conversation with pagination
    async fn find_by_conversation(
        &self,
        conversation_id: i64,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>>;

    /// Find a message by the provider message-id of its originating email
    /// (duplicate webhook deliveries resolve to the same row)
    async fn find_by_email_message_id(
        &self,
        conversation_id: i64,
        email_message_id: &str,
    ) -> RepoResult<Option<Message>>;

    /// Insert a new message; the datastore assigns id and timestamp
    async fn create(&self, message: &NewMessage) -> RepoResult<Message>;
}

// ============================================================================
// Party Repositories
// ============================================================================

#[async_trait]
pub trait LenderRepository: Send + Sync {
    /// Find lender by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Lender>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;
}

#[async_trait]
pub trait FinancingRequestRepository: Send + Sync {
    /// Find financing request by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<FinancingRequest>>;
}
