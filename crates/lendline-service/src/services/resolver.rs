//! Sender resolver
//!
//! Classifies the sender of an inbound message as the conversation's buyer
//! or lender and works out who the counter-notification goes to.

use tracing::instrument;

use lendline_core::entities::{Conversation, FinancingRequest, Lender, SenderType, User};
use lendline_core::DomainError;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Resolved sender and counterparty identities for one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParties {
    pub sender_type: SenderType,
    /// Registered account id of the sender; absent for guest buyers
    pub sender_id: Option<i64>,
    pub sender_name: String,
    pub recipient_type: SenderType,
    pub recipient_id: Option<i64>,
    /// Missing only when a guest buyer record carries no contact email;
    /// notification dispatch skips such recipients
    pub recipient_email: Option<String>,
    pub recipient_name: Option<String>,
}

/// Sender resolver
pub struct SenderResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SenderResolver<'a> {
    /// Create a new SenderResolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve which party of the conversation `candidate_email` belongs to
    ///
    /// Checks run in a fixed order, first match wins:
    /// 1. the conversation's lender,
    /// 2. the registered user on the financing request,
    /// 3. the financing request's raw contact email (guest submissions).
    ///
    /// Comparison is case-insensitive with no whitespace normalization; an
    /// address that matches neither party is an authorization failure and
    /// nothing may be persisted for it.
    #[instrument(skip(self, conversation), fields(conversation_id = conversation.id))]
    pub async fn resolve(
        &self,
        conversation: &Conversation,
        candidate_email: &str,
    ) -> ServiceResult<ResolvedParties> {
        let lender = self
            .ctx
            .lender_repo()
            .find_by_id(conversation.lender_id)
            .await?
            .ok_or_else(|| {
                ServiceError::internal(format!(
                    "conversation {} references missing lender {}",
                    conversation.id, conversation.lender_id
                ))
            })?;

        let request = self
            .ctx
            .financing_request_repo()
            .find_by_id(conversation.financing_request_id)
            .await?
            .ok_or_else(|| {
                ServiceError::internal(format!(
                    "conversation {} references missing financing request {}",
                    conversation.id, conversation.financing_request_id
                ))
            })?;

        let user = match request.user_id {
            Some(user_id) => self.ctx.user_repo().find_by_id(user_id).await?,
            None => None,
        };

        if emails_match(&lender.email, candidate_email) {
            return Ok(lender_sender(&lender, &request, user.as_ref()));
        }

        if let Some(user) = user.as_ref() {
            if emails_match(&user.email, candidate_email) {
                return Ok(buyer_sender(&lender, Some(user), &user.email));
            }
        }

        if let Some(contact_email) = request.contact_email.as_deref() {
            if emails_match(contact_email, candidate_email) {
                return Ok(buyer_sender(&lender, None, contact_email));
            }
        }

        Err(ServiceError::Domain(DomainError::NotParticipant))
    }
}

/// Case-insensitive address comparison; no whitespace normalization
fn emails_match(known: &str, candidate: &str) -> bool {
    known.eq_ignore_ascii_case(candidate)
}

fn lender_sender(
    lender: &Lender,
    request: &FinancingRequest,
    user: Option<&User>,
) -> ResolvedParties {
    // Recipient is the buyer: the registered user when one exists, else the
    // guest contact on the financing request
    let (recipient_id, recipient_email, recipient_name) = match user {
        Some(user) => (
            Some(user.id),
            Some(user.email.clone()),
            Some(user.display_name()),
        ),
        None => (None, request.contact_email.clone(), None),
    };

    ResolvedParties {
        sender_type: SenderType::Lender,
        sender_id: Some(lender.id),
        sender_name: lender.name.clone(),
        recipient_type: SenderType::Buyer,
        recipient_id,
        recipient_email,
        recipient_name,
    }
}

fn buyer_sender(lender: &Lender, user: Option<&User>, sender_email: &str) -> ResolvedParties {
    let (sender_id, sender_name) = match user {
        Some(user) => (Some(user.id), user.display_name()),
        None => (None, sender_email.to_string()),
    };

    ResolvedParties {
        sender_type: SenderType::Buyer,
        sender_id,
        sender_name,
        recipient_type: SenderType::Lender,
        recipient_id: Some(lender.id),
        recipient_email: Some(lender.email.clone()),
        recipient_name: Some(lender.name.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emails_match_is_case_insensitive() {
        assert!(emails_match("lender@x.com", "Lender@X.com"));
        assert!(!emails_match("lender@x.com", "other@x.com"));
    }

    #[test]
    fn test_emails_match_keeps_whitespace_significant() {
        // A trailing space from a mail client is an accepted false negative
        assert!(!emails_match("lender@x.com", "lender@x.com "));
    }
}
