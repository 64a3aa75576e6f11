//! Conversation handlers
//!
//! Endpoints for the inline reply form and conversation message listings.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use lendline_service::{
    ConversationService, InboundMessageResponse, InboundMessageService, MessageResponse,
    ReplyFormRequest,
};

use crate::extractors::{Pagination, ValidatedForm};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Header carrying the reply-form sender's email address
const SENDER_EMAIL_HEADER: &str = "x-sender-email";

/// Submit an inline reply
///
/// POST /conversations/reply
pub async fn submit_reply(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedForm(request): ValidatedForm<ReplyFormRequest>,
) -> ApiResult<Created<Json<InboundMessageResponse>>> {
    let sender_email = headers
        .get(SENDER_EMAIL_HEADER)
        .and_then(|value| value.to_str().ok());

    let service = InboundMessageService::new(state.service_context());
    let response = service.process_reply_form(request, sender_email).await?;
    Ok(Created(Json(response)))
}

/// Get messages in a conversation
///
/// GET /conversations/{conversation_id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let conversation_id = conversation_id
        .parse()
        .map_err(|_| crate::response::ApiError::invalid_path("Invalid conversation_id format"))?;

    let service = ConversationService::new(state.service_context());
    let messages = service
        .get_messages(
            conversation_id,
            pagination.before,
            pagination.after,
            i64::from(pagination.limit),
        )
        .await?;
    Ok(Json(messages))
}
