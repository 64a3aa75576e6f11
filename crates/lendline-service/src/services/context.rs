//! Service context - dependency container for services
//!
//! Holds all repositories, the notification gateway, and other dependencies
//! needed by services. Everything is behind trait objects so tests can swap
//! in in-memory implementations.

use std::sync::Arc;

use lendline_core::traits::{
    ConversationRepository, FinancingRequestRepository, LenderRepository, MessageRepository,
    NotificationGateway, UserRepository,
};
use lendline_core::ReplyAddressCodec;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The mail-provider notification gateway
/// - The reply-address codec for the configured inbound domain
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    conversation_repo: Arc<dyn ConversationRepository>,
    message_repo: Arc<dyn MessageRepository>,
    lender_repo: Arc<dyn LenderRepository>,
    user_repo: Arc<dyn UserRepository>,
    financing_request_repo: Arc<dyn FinancingRequestRepository>,

    // Outbound notifications
    notification_gateway: Arc<dyn NotificationGateway>,

    // Reply address routing
    reply_codec: Arc<ReplyAddressCodec>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        conversation_repo: Arc<dyn ConversationRepository>,
        message_repo: Arc<dyn MessageRepository>,
        lender_repo: Arc<dyn LenderRepository>,
        user_repo: Arc<dyn UserRepository>,
        financing_request_repo: Arc<dyn FinancingRequestRepository>,
        notification_gateway: Arc<dyn NotificationGateway>,
        reply_codec: Arc<ReplyAddressCodec>,
    ) -> Self {
        Self {
            conversation_repo,
            message_repo,
            lender_repo,
            user_repo,
            financing_request_repo,
            notification_gateway,
            reply_codec,
        }
    }

    // === Repositories ===

    /// Get the conversation repository
    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the lender repository
    pub fn lender_repo(&self) -> &dyn LenderRepository {
        self.lender_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the financing request repository
    pub fn financing_request_repo(&self) -> &dyn FinancingRequestRepository {
        self.financing_request_repo.as_ref()
    }

    // === Notifications ===

    /// Get the notification gateway
    pub fn notification_gateway(&self) -> &dyn NotificationGateway {
        self.notification_gateway.as_ref()
    }

    /// Get the reply address codec
    pub fn reply_codec(&self) -> &ReplyAddressCodec {
        self.reply_codec.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("notification_gateway", &"NotificationGateway")
            .field("reply_codec", &self.reply_codec.domain())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    lender_repo: Option<Arc<dyn LenderRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    financing_request_repo: Option<Arc<dyn FinancingRequestRepository>>,
    notification_gateway: Option<Arc<dyn NotificationGateway>>,
    reply_codec: Option<Arc<ReplyAddressCodec>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            conversation_repo: None,
            message_repo: None,
            lender_repo: None,
            user_repo: None,
            financing_request_repo: None,
            notification_gateway: None,
            reply_codec: None,
        }
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn lender_repo(mut self, repo: Arc<dyn LenderRepository>) -> Self {
        self.lender_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn financing_request_repo(mut self, repo: Arc<dyn FinancingRequestRepository>) -> Self {
        self.financing_request_repo = Some(repo);
        self
    }

    pub fn notification_gateway(mut self, gateway: Arc<dyn NotificationGateway>) -> Self {
        self.notification_gateway = Some(gateway);
        self
    }

    pub fn reply_codec(mut self, codec: Arc<ReplyAddressCodec>) -> Self {
        self.reply_codec = Some(codec);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.conversation_repo
                .ok_or_else(|| ServiceError::validation("conversation_repo is required"))?,
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.lender_repo
                .ok_or_else(|| ServiceError::validation("lender_repo is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.financing_request_repo
                .ok_or_else(|| ServiceError::validation("financing_request_repo is required"))?,
            self.notification_gateway
                .ok_or_else(|| ServiceError::validation("notification_gateway is required"))?,
            self.reply_codec
                .ok_or_else(|| ServiceError::validation("reply_codec is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
