//! Message entity <-> model mapper

use lendline_core::entities::{Message, NewMessage, SenderType};

use crate::models::MessageModel;

/// Convert SenderType enum to database string
pub fn sender_type_to_str(sender_type: SenderType) -> &'static str {
    sender_type.as_str()
}

/// Convert database sender type string to SenderType enum
fn parse_sender_type(type_str: &str) -> SenderType {
    SenderType::parse(type_str).unwrap_or(SenderType::Buyer)
}

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: model.id,
            conversation_id: model.conversation_id,
            sender_type: parse_sender_type(&model.sender_type),
            sender_id: model.sender_id,
            sender_email: model.sender_email,
            message_text: model.message_text,
            message_html: model.message_html,
            is_email_origin: model.is_email_origin,
            email_message_id: model.email_message_id,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}

/// Convert NewMessage reference to values for database insertion
pub struct MessageInsert<'a> {
    pub conversation_id: i64,
    pub sender_type: &'static str,
    pub sender_id: Option<i64>,
    pub sender_email: &'a str,
    pub message_text: &'a str,
    pub message_html: Option<&'a str>,
    pub is_email_origin: bool,
    pub email_message_id: Option<&'a str>,
}

impl<'a> MessageInsert<'a> {
    pub fn new(message: &'a NewMessage) -> Self {
        Self {
            conversation_id: message.conversation_id,
            sender_type: sender_type_to_str(message.sender_type),
            sender_id: message.sender_id,
            sender_email: &message.sender_email,
            message_text: &message.message_text,
            message_html: message.message_html.as_deref(),
            is_email_origin: message.is_email_origin,
            email_message_id: message.email_message_id.as_deref(),
        }
    }
}
