//! HTTP client for the mail provider's send API

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use lendline_common::{AppError, MailConfig};
use lendline_core::error::DomainError;
use lendline_core::traits::{NotificationGateway, OutboundEmail};

use crate::payload::{SendEmailRequest, SendEmailResponse};

/// Message stream used for conversation notifications
const MESSAGE_STREAM: &str = "outbound";

/// Client for a Postmark-style send-email JSON API
#[derive(Clone)]
pub struct PostmarkClient {
    http: reqwest::Client,
    base_url: String,
    server_token: String,
    from_address: String,
}

impl PostmarkClient {
    /// Create a client from mail configuration
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &MailConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::MailProvider(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            server_token: config.server_token.clone(),
            from_address: config.from_address.clone(),
        })
    }

    /// The sender address outbound notifications are stamped with
    pub fn from_address(&self) -> &str {
        &self.from_address
    }
}

#[async_trait]
impl NotificationGateway for PostmarkClient {
    #[instrument(skip(self, email), fields(to = %email.to))]
    async fn send(&self, email: &OutboundEmail) -> Result<(), DomainError> {
        let request = SendEmailRequest {
            from: &self.from_address,
            to: &email.to,
            reply_to: &email.reply_to,
            subject: &email.subject,
            html_body: &email.html_body,
            amp_body: email.amp_body.as_deref(),
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http
            .post(format!("{}/email", self.base_url))
            .header("Accept", "application/json")
            .header("X-Postmark-Server-Token", &self.server_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::MailError(e.to_string()))?;

        let status = response.status();
        let body: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| DomainError::MailError(format!("invalid provider response: {e}")))?;

        if !status.is_success() || body.error_code != 0 {
            return Err(DomainError::MailError(format!(
                "provider rejected send (status {status}, code {}): {}",
                body.error_code, body.message
            )));
        }

        debug!(
            provider_message_id = body.message_id.as_deref().unwrap_or("-"),
            "notification email accepted by provider"
        );
        Ok(())
    }
}
