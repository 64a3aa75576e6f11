//! Notification service
//!
//! Composes and dispatches the counterparty email after a message has been
//! persisted. Dispatch is strictly best-effort: every failure is caught and
//! logged here so the inbound request can still report success, because the
//! message is already durably recorded and the counterparty will see it on
//! their next visit.

use tracing::{info, instrument, warn};

use lendline_core::entities::{Conversation, Message};
use lendline_core::traits::OutboundEmail;

use super::context::ServiceContext;
use super::resolver::ResolvedParties;

/// Length of the message excerpt included in notification copy
const EXCERPT_LEN: usize = 200;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Best-effort notification of the conversation's other party
    ///
    /// Returns whether the notification was handed to the provider. Never
    /// returns an error: failures are logged and swallowed.
    #[instrument(skip(self, conversation, parties, message), fields(conversation_id = conversation.id))]
    pub async fn notify_counterparty(
        &self,
        conversation: &Conversation,
        parties: &ResolvedParties,
        message: &Message,
    ) -> bool {
        let Some(recipient_email) = parties.recipient_email.as_deref() else {
            warn!(
                recipient_type = %parties.recipient_type,
                "skipping notification, no reachable address for recipient"
            );
            return false;
        };

        // Every notification gets a fresh reply address for the conversation
        let reply_to = self.ctx.reply_codec().encode(conversation.id);

        let email = OutboundEmail {
            to: recipient_email.to_string(),
            reply_to,
            subject: subject_line(conversation),
            html_body: html_body(conversation, parties, message),
            amp_body: Some(amp_body(conversation, parties, message)),
        };

        match self.ctx.notification_gateway().send(&email).await {
            Ok(()) => {
                info!(to = recipient_email, "counterparty notification sent");
                true
            }
            Err(e) => {
                warn!(to = recipient_email, error = %e, "counterparty notification failed");
                false
            }
        }
    }
}

fn subject_line(conversation: &Conversation) -> String {
    format!(
        "New message about your {} financing request",
        conversation.property_type
    )
}

fn html_body(conversation: &Conversation, parties: &ResolvedParties, message: &Message) -> String {
    let greeting = match parties.recipient_name.as_deref() {
        Some(name) if !name.is_empty() => format!("Hi {},", escape_html(name)),
        _ => "Hi,".to_string(),
    };

    format!(
        "<p>{greeting}</p>\
         <p>{sender} sent you a new message about the {property} financing request \
         ({amount}):</p>\
         <blockquote>{excerpt}</blockquote>\
         <p>Reply to this email to continue the conversation.</p>",
        sender = escape_html(&parties.sender_name),
        property = escape_html(&conversation.property_type),
        amount = format_loan_amount(conversation.loan_amount),
        excerpt = escape_html(message.preview(EXCERPT_LEN)),
    )
}

fn amp_body(conversation: &Conversation, parties: &ResolvedParties, message: &Message) -> String {
    format!(
        "<!doctype html>\
         <html amp4email data-css-strict>\
         <head><meta charset=\"utf-8\">\
         <script async src=\"https://cdn.ampproject.org/v0.js\"></script>\
         <style amp4email-boilerplate>body{{visibility:hidden}}</style>\
         </head>\
         <body>{body}</body>\
         </html>",
        body = html_body(conversation, parties, message),
    )
}

fn format_loan_amount(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
