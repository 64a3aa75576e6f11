//! Wire types for the provider's send-email endpoint

use serde::{Deserialize, Serialize};

/// Request body for POST /email
#[derive(Debug, Serialize)]
pub(crate) struct SendEmailRequest<'a> {
    #[serde(rename = "From")]
    pub from: &'a str,
    #[serde(rename = "To")]
    pub to: &'a str,
    #[serde(rename = "ReplyTo")]
    pub reply_to: &'a str,
    #[serde(rename = "Subject")]
    pub subject: &'a str,
    #[serde(rename = "HtmlBody")]
    pub html_body: &'a str,
    #[serde(rename = "AmpBody", skip_serializing_if = "Option::is_none")]
    pub amp_body: Option<&'a str>,
    #[serde(rename = "MessageStream")]
    pub message_stream: &'a str,
}

/// Response body from POST /email
///
/// The provider reports failures both as non-2xx statuses and as a non-zero
/// `ErrorCode` inside a 200 response; both paths must be checked.
#[derive(Debug, Deserialize)]
pub(crate) struct SendEmailResponse {
    #[serde(rename = "ErrorCode", default)]
    pub error_code: i64,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "MessageID", default)]
    pub message_id: Option<String>,
}
