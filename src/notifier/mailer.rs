//! Email delivery channels.

use crate::error::{DeliveryError, DeliveryResult};
use crate::types::EmailAddress;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// One outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: EmailAddress,
    pub from: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// What a channel did with a message it accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    /// Handed to the email service.
    Sent,
    /// Not sent because no delivery service is configured.
    Skipped,
}

/// Trait for delivery channels.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Deliver a single message.
    async fn send(&self, message: &EmailMessage) -> DeliveryResult<Delivery>;
}

/// Delivers through an HTTP email API (SendGrid, Resend, Postmark style).
///
/// The message is POSTed as JSON with a bearer credential; any non-2xx
/// response counts as a failed delivery.
pub struct HttpMailer {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpMailer {
    /// Create a mailer for `endpoint` with a per-request `timeout`.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> DeliveryResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client,
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn send(&self, message: &EmailMessage) -> DeliveryResult<Delivery> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                to: message.to.to_string(),
            });
        }

        debug!(to = %message.to, "Email accepted by delivery service");
        Ok(Delivery::Sent)
    }
}

/// Mock delivery: logs what would have been sent and reports it skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: &EmailMessage) -> DeliveryResult<Delivery> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "[MOCK] Email would be sent"
        );
        Ok(Delivery::Skipped)
    }
}
