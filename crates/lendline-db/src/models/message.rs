//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_type: String,
    pub sender_id: Option<i64>,
    pub sender_email: String,
    pub message_text: String,
    pub message_html: Option<String>,
    pub is_email_origin: bool,
    pub email_message_id: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageModel {
    /// Check if the message arrived via the email channel
    #[inline]
    pub fn is_email_origin(&self) -> bool {
        self.is_email_origin
    }
}
