//! Entity to response DTO mappers

use lendline_core::entities::Message;

use super::responses::MessageResponse;

/// Convert Message entity to MessageResponse
impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            sender_type: message.sender_type.as_str().to_string(),
            sender_id: message.sender_id.map(|id| id.to_string()),
            message_text: message.message_text,
            is_email_origin: message.is_email_origin,
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}
