//! Response DTOs for API endpoints

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of processing an inbound message (webhook or reply form)
///
/// `notified` distinguishes success-with-notification-sent from
/// success-with-notification-failed; the message is durably recorded either
/// way. `duplicate` marks a webhook redelivery that resolved to an already
/// persisted message.
#[derive(Debug, Clone, Serialize)]
pub struct InboundMessageResponse {
    pub message_id: String,
    pub conversation_id: String,
    pub sender_type: String,
    pub notified: bool,
    pub duplicate: bool,
}

/// A message in a conversation listing
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    pub message_text: String,
    pub is_email_origin: bool,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Basic health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness response with dependency health
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "degraded" },
            database,
        }
    }
}
