//! Conversation entity <-> model mapper

use lendline_core::entities::Conversation;

use crate::models::ConversationModel;

/// Convert ConversationModel to Conversation entity
impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: model.id,
            financing_request_id: model.financing_request_id,
            lender_id: model.lender_id,
            property_type: model.property_type,
            loan_amount: model.loan_amount,
            last_message_at: model.last_message_at,
            last_message_preview: model.last_message_preview,
            created_at: model.created_at,
        }
    }
}
