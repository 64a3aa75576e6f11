//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Build a reply address for a conversation on the configured inbound domain
pub fn reply_address(conversation_id: i64) -> String {
    let suffix = unique_suffix();
    let domain =
        std::env::var("MAIL_INBOUND_DOMAIN").unwrap_or_else(|_| "inbound.example.com".to_string());
    format!("conv_{conversation_id}_{suffix:016x}@{domain}")
}

/// Inbound email webhook payload
#[derive(Debug, Clone, Serialize)]
pub struct InboundEmailPayload {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

impl InboundEmailPayload {
    /// A well-formed webhook payload addressed to a conversation
    pub fn to_conversation(conversation_id: i64, from: &str, text: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            from: Some(from.to_string()),
            to: Some(reply_address(conversation_id)),
            subject: Some("Re: Your financing request".to_string()),
            text: Some(text.to_string()),
            html: None,
            message_id: Some(format!("<test-{suffix}@provider.example>")),
        }
    }
}

/// Inline reply form fields
#[derive(Debug, Clone, Serialize)]
pub struct ReplyForm {
    pub conversation_id: i64,
    pub message: String,
}

/// Inbound processing response
#[derive(Debug, Deserialize)]
pub struct InboundMessageBody {
    pub message_id: String,
    pub conversation_id: String,
    pub sender_type: String,
    pub notified: bool,
    pub duplicate: bool,
}

/// Message listing entry
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub id: String,
    pub conversation_id: String,
    pub sender_type: String,
    pub message_text: String,
    pub is_email_origin: bool,
    pub is_read: bool,
}

/// Health response
#[derive(Debug, Deserialize)]
pub struct HealthBody {
    pub status: String,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
