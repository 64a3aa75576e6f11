//! Conversation entity - a buyer/lender thread attached to a financing request

use chrono::{DateTime, Utc};

/// Conversation entity
///
/// Property type and loan amount are denormalized from the financing request
/// so that notification copy can be composed without extra lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: i64,
    pub financing_request_id: i64,
    pub lender_id: i64,
    pub property_type: String,
    pub loan_amount: i64,
    pub last_message_at: Option<DateTime<Utc>>,
    pub last_message_preview: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Maximum length of the stored last-message preview
    pub const PREVIEW_LEN: usize = 100;

    /// Check if the conversation has any recorded message activity
    #[inline]
    pub fn has_messages(&self) -> bool {
        self.last_message_at.is_some()
    }
}
