//! Notification gateway trait (port) - outbound email delivery

use async_trait::async_trait;

use crate::error::DomainError;

/// A composed notification email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    /// Freshly generated conversation reply address
    pub reply_to: String,
    pub subject: String,
    pub html_body: String,
    /// AMP variant of the body, for clients that render interactive replies
    pub amp_body: Option<String>,
}

/// Delivery port implemented by the mail-provider client
///
/// Callers past the persistence boundary must treat a send failure as
/// non-fatal: catch it, log it, and report the request as successful.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Dispatch one email; errors describe provider or transport failures
    async fn send(&self, email: &OutboundEmail) -> Result<(), DomainError>;
}
