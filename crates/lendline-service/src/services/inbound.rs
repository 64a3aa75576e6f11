//! Inbound message service
//!
//! Handles both shapes an inbound message can arrive in - the provider's
//! email webhook and the inline reply form - and runs them through one
//! pipeline: locate the conversation, authorize the sender, clean the
//! content, persist the message, then best-effort notify the other party.

use tracing::{info, instrument, warn};

use lendline_core::entities::{Conversation, Message, NewMessage};
use lendline_core::sanitize::clean_reply_content;
use lendline_core::{extract_email_address, DomainError};

use crate::dto::requests::{InboundEmailRequest, ReplyFormRequest, REPLY_MESSAGE_MAX_LEN};
use crate::dto::responses::InboundMessageResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;
use super::resolver::{ResolvedParties, SenderResolver};

/// Inbound message service
pub struct InboundMessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InboundMessageService<'a> {
    /// Create a new InboundMessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Process an inbound email delivered by the provider webhook
    #[instrument(skip(self, request))]
    pub async fn process_webhook(
        &self,
        request: InboundEmailRequest,
    ) -> ServiceResult<InboundMessageResponse> {
        let from = non_blank(request.from.as_deref())
            .ok_or(ServiceError::Domain(DomainError::MissingField("from")))?;
        let to = non_blank(request.to.as_deref())
            .ok_or(ServiceError::Domain(DomainError::MissingField("to")))?;

        let sender_email = extract_email_address(from).ok_or_else(|| {
            ServiceError::Domain(DomainError::ValidationError(format!(
                "no email address in from header: {from}"
            )))
        })?;

        let conversation_id = self.ctx.reply_codec().decode(to).ok_or_else(|| {
            ServiceError::Domain(DomainError::UnroutableReplyAddress(to.to_string()))
        })?;

        let conversation = self.load_conversation(conversation_id).await?;

        // A provider may deliver the same email more than once; the original
        // message-id makes redeliveries resolve to the already stored row
        let email_message_id = request
            .message_id
            .as_deref()
            .and_then(normalize_message_id);
        if let Some(ref message_id) = email_message_id {
            if let Some(existing) = self
                .ctx
                .message_repo()
                .find_by_email_message_id(conversation.id, message_id)
                .await?
            {
                info!(
                    message_id = existing.id,
                    email_message_id = message_id.as_str(),
                    "duplicate webhook delivery, reusing stored message"
                );
                return Ok(InboundMessageResponse {
                    message_id: existing.id.to_string(),
                    conversation_id: conversation.id.to_string(),
                    sender_type: existing.sender_type.as_str().to_string(),
                    notified: false,
                    duplicate: true,
                });
            }
        }

        let parties = SenderResolver::new(self.ctx)
            .resolve(&conversation, &sender_email)
            .await?;

        let cleaned = clean_reply_content(request.text.as_deref(), request.html.as_deref());
        let message_html = if cleaned.html.is_empty() {
            None
        } else {
            Some(cleaned.html.clone())
        };

        let new_message = NewMessage {
            conversation_id: conversation.id,
            sender_type: parties.sender_type,
            sender_id: parties.sender_id,
            sender_email,
            message_text: cleaned.body_text(),
            message_html,
            is_email_origin: true,
            email_message_id,
        };

        self.persist_and_notify(&conversation, &parties, new_message)
            .await
    }

    /// Process an inline reply form submission
    ///
    /// The sender's address arrives in a request header rather than the form
    /// body; the message is trimmed and length-capped before any datastore
    /// access.
    #[instrument(skip(self, request, sender_email))]
    pub async fn process_reply_form(
        &self,
        request: ReplyFormRequest,
        sender_email: Option<&str>,
    ) -> ServiceResult<InboundMessageResponse> {
        let sender_email = non_blank(sender_email)
            .ok_or(ServiceError::Domain(DomainError::MissingField("x-sender-email")))?
            .to_ascii_lowercase();

        let message_text = request.message.trim();
        if message_text.is_empty() {
            return Err(ServiceError::Domain(DomainError::MissingField("message")));
        }
        if message_text.chars().count() > REPLY_MESSAGE_MAX_LEN {
            return Err(ServiceError::Domain(DomainError::MessageTooLong {
                max: REPLY_MESSAGE_MAX_LEN,
            }));
        }

        let conversation = self.load_conversation(request.conversation_id).await?;

        let parties = SenderResolver::new(self.ctx)
            .resolve(&conversation, &sender_email)
            .await?;

        let new_message = NewMessage {
            conversation_id: conversation.id,
            sender_type: parties.sender_type,
            sender_id: parties.sender_id,
            sender_email,
            message_text: message_text.to_string(),
            message_html: None,
            is_email_origin: false,
            email_message_id: None,
        };

        self.persist_and_notify(&conversation, &parties, new_message)
            .await
    }

    async fn load_conversation(&self, id: i64) -> ServiceResult<Conversation> {
        self.ctx
            .conversation_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", id.to_string()))
    }

    /// Shared pipeline tail: persist the message, record conversation
    /// activity, then attempt the counterparty notification
    async fn persist_and_notify(
        &self,
        conversation: &Conversation,
        parties: &ResolvedParties,
        new_message: NewMessage,
    ) -> ServiceResult<InboundMessageResponse> {
        let message: Message = self.ctx.message_repo().create(&new_message).await?;

        if let Err(e) = self
            .ctx
            .conversation_repo()
            .record_last_message(
                conversation.id,
                message.created_at,
                message.preview(Conversation::PREVIEW_LEN),
            )
            .await
        {
            // The message itself is already durable; a stale preview is
            // recoverable on the next message
            warn!(conversation_id = conversation.id, error = %e, "failed to update conversation preview");
        }

        info!(
            message_id = message.id,
            conversation_id = conversation.id,
            sender_type = %message.sender_type,
            "inbound message persisted"
        );

        let notified = NotificationService::new(self.ctx)
            .notify_counterparty(conversation, parties, &message)
            .await;

        Ok(InboundMessageResponse {
            message_id: message.id.to_string(),
            conversation_id: conversation.id.to_string(),
            sender_type: message.sender_type.as_str().to_string(),
            notified,
            duplicate: false,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Strip angle brackets and lowercase a provider message-id
fn normalize_message_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches(|ch| matches!(ch, '<' | '>'));
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}
