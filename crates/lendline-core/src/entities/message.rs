//! Message entity - a single message within a conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the conversation authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Buyer,
    Lender,
}

impl SenderType {
    /// String form used for persistence and API responses
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Lender => "lender",
        }
    }

    /// Parse the persisted string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "buyer" => Some(Self::Buyer),
            "lender" => Some(Self::Lender),
            _ => None,
        }
    }

    /// The other party of the conversation
    #[inline]
    pub fn counterparty(self) -> Self {
        match self {
            Self::Buyer => Self::Lender,
            Self::Lender => Self::Buyer,
        }
    }
}

impl std::fmt::Display for SenderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_type: SenderType,
    /// Registered account id of the sender; absent for guest buyers
    pub sender_id: Option<i64>,
    pub sender_email: String,
    pub message_text: String,
    pub message_html: Option<String>,
    pub is_email_origin: bool,
    /// Provider message-id of the originating email, used to suppress
    /// duplicate webhook deliveries
    pub email_message_id: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Get a truncated preview of the message (for conversation listings
    /// and notifications)
    pub fn preview(&self, max_len: usize) -> &str {
        truncate_on_char_boundary(&self.message_text, max_len)
    }

    /// Check if message text is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.message_text.trim().is_empty()
    }
}

/// A message about to be persisted; the datastore assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub conversation_id: i64,
    pub sender_type: SenderType,
    pub sender_id: Option<i64>,
    pub sender_email: String,
    pub message_text: String,
    pub message_html: Option<String>,
    pub is_email_origin: bool,
    pub email_message_id: Option<String>,
}

impl NewMessage {
    /// Truncated preview of the pending message text
    pub fn preview(&self, max_len: usize) -> &str {
        truncate_on_char_boundary(&self.message_text, max_len)
    }
}

fn truncate_on_char_boundary(content: &str, max_len: usize) -> &str {
    if content.len() <= max_len {
        content
    } else {
        let mut end = max_len;
        while !content.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        &content[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> Message {
        Message {
            id: 1,
            conversation_id: 100,
            sender_type: SenderType::Buyer,
            sender_id: Some(200),
            sender_email: "buyer@example.com".to_string(),
            message_text: text.to_string(),
            message_html: None,
            is_email_origin: false,
            email_message_id: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sender_type_round_trip() {
        assert_eq!(SenderType::parse("buyer"), Some(SenderType::Buyer));
        assert_eq!(SenderType::parse("lender"), Some(SenderType::Lender));
        assert_eq!(SenderType::parse("admin"), None);
        assert_eq!(SenderType::Buyer.as_str(), "buyer");
    }

    #[test]
    fn test_counterparty() {
        assert_eq!(SenderType::Buyer.counterparty(), SenderType::Lender);
        assert_eq!(SenderType::Lender.counterparty(), SenderType::Buyer);
    }

    #[test]
    fn test_message_preview() {
        let msg = message("Hello, world!");
        assert_eq!(msg.preview(5), "Hello");
        assert_eq!(msg.preview(100), "Hello, world!");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let msg = message("héllo");
        // 'é' is two bytes; slicing inside it must back off
        assert_eq!(msg.preview(2), "h");
    }

    #[test]
    fn test_is_empty() {
        assert!(message("   ").is_empty());
        assert!(!message("hi").is_empty());
    }
}
