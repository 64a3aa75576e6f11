//! Inbound email webhook handler
//!
//! Endpoint the mail provider posts to when an email arrives on the inbound
//! domain.

use axum::{extract::State, Json};
use lendline_service::{InboundEmailRequest, InboundMessageResponse, InboundMessageService};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Receive an inbound email
///
/// POST /email/inbound
pub async fn receive_inbound_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<InboundEmailRequest>,
) -> ApiResult<Created<Json<InboundMessageResponse>>> {
    let service = InboundMessageService::new(state.service_context());
    let response = service.process_webhook(request).await?;
    Ok(Created(Json(response)))
}
