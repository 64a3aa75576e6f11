//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Conversation not found: {0}")]
    ConversationNotFound(i64),

    #[error("Message not found: {0}")]
    MessageNotFound(i64),

    #[error("Lender not found: {0}")]
    LenderNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Financing request not found: {0}")]
    FinancingRequestNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Reply address is not routable: {0}")]
    UnroutableReplyAddress(String),

    #[error("Message too long: max {max} characters")]
    MessageTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Sender is not a participant of this conversation")]
    NotParticipant,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Mail provider error: {0}")]
    MailError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ConversationNotFound(_) => "UNKNOWN_CONVERSATION",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::LenderNotFound(_) => "UNKNOWN_LENDER",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::FinancingRequestNotFound(_) => "UNKNOWN_FINANCING_REQUEST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::UnroutableReplyAddress(_) => "UNROUTABLE_REPLY_ADDRESS",
            Self::MessageTooLong { .. } => "MESSAGE_TOO_LONG",

            // Authorization
            Self::NotParticipant => "NOT_PARTICIPANT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::MailError(_) => "MAIL_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ConversationNotFound(_)
                | Self::MessageNotFound(_)
                | Self::LenderNotFound(_)
                | Self::UserNotFound(_)
                | Self::FinancingRequestNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::MissingField(_)
                | Self::UnroutableReplyAddress(_)
                | Self::MessageTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotParticipant)
    }
}
