//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies with validation rules
//! also implement `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Maximum accepted length of an inline reply body
pub const REPLY_MESSAGE_MAX_LEN: usize = 5000;

/// Inbound email webhook payload
///
/// Posted by the mail provider when a message arrives on the inbound domain.
/// `from` and `to` are required but modeled as options so their absence can
/// be rejected with a field-specific error instead of a deserialization
/// failure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InboundEmailRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// Inline reply form submission
///
/// The sender's identity travels in the `x-sender-email` request header, not
/// in the form body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyFormRequest {
    pub conversation_id: i64,

    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_form_length_validation() {
        let request = ReplyFormRequest {
            conversation_id: 1,
            message: "a".repeat(REPLY_MESSAGE_MAX_LEN + 1),
        };
        assert!(request.validate().is_err());

        let request = ReplyFormRequest {
            conversation_id: 1,
            message: "Sounds good.".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_webhook_payload_deserializes_with_missing_optionals() {
        let json = r#"{"from":"a@x.com","to":"conv_1_ab@inbound.example.com"}"#;
        let request: InboundEmailRequest = serde_json::from_str(json).unwrap();
        assert!(request.text.is_none());
        assert!(request.message_id.is_none());
    }
}
