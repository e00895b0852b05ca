//! Digest delivery to subscribers.
//!
//! The [`Notifier`] picks the subscribers of one frequency, renders a single
//! digest, and delivers it to each of them as an independent task. A failed
//! delivery is logged and recorded in the [`DeliveryReport`]; it never stops
//! the remaining deliveries and is never retried.
//!
//! # Configuration
//!
//! [`Notifier::from_settings`] uses [`HttpMailer`] when both
//! `EMAIL_SERVICE_URL` and `EMAIL_API_KEY` are set, and falls back to
//! [`LogMailer`] (mock mode) otherwise.

pub mod mailer;
pub mod rate_limiter;

pub use mailer::{Delivery, EmailMessage, HttpMailer, LogMailer, Mailer};
pub use rate_limiter::RateLimiter;

use crate::config::Settings;
use crate::digest::DigestComposer;
use crate::error::{DeliveryError, DeliveryResult};
use crate::storage::{Candidate, Store, Tool};
use crate::types::{EmailAddress, Frequency};
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of one delivery attempt.
#[derive(Debug)]
pub struct DeliveryOutcome {
    /// Recipient.
    pub email: EmailAddress,
    /// What happened.
    pub result: DeliveryResult<Delivery>,
}

/// Per-subscriber results of one [`Notifier::notify`] call.
#[derive(Debug)]
pub struct DeliveryReport {
    /// Frequency class that was notified.
    pub frequency: Frequency,
    /// One entry per attempted subscriber.
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DeliveryReport {
    fn empty(frequency: Frequency) -> Self {
        Self {
            frequency,
            outcomes: Vec::new(),
        }
    }

    /// Number of delivery attempts.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of messages handed to the email service.
    pub fn delivered(&self) -> usize {
        self.count(Delivery::Sent)
    }

    /// Number of messages only logged because delivery is not configured.
    pub fn skipped(&self) -> usize {
        self.count(Delivery::Skipped)
    }

    /// Number of failed deliveries.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    fn count(&self, delivery: Delivery) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(d) if d == delivery))
            .count()
    }

    /// Whether any delivery was attempted.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Serializable counts.
    pub fn summary(&self) -> DeliverySummary {
        DeliverySummary {
            frequency: self.frequency,
            attempted: self.attempted(),
            delivered: self.delivered(),
            skipped: self.skipped(),
            failed: self.failed(),
        }
    }
}

/// Delivery counts for one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliverySummary {
    pub frequency: Frequency,
    pub attempted: usize,
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Sends digests to subscribers.
pub struct Notifier {
    store: Arc<dyn Store>,
    mailer: Arc<dyn Mailer>,
    from: String,
    limiter: Option<RateLimiter>,
}

impl Notifier {
    /// Create a notifier delivering through `mailer`.
    pub fn new(store: Arc<dyn Store>, mailer: Arc<dyn Mailer>, from: impl Into<String>) -> Self {
        Self {
            store,
            mailer,
            from: from.into(),
            limiter: None,
        }
    }

    /// Build a notifier from settings, choosing the mailer by configuration.
    pub fn from_settings(store: Arc<dyn Store>, settings: &Settings) -> DeliveryResult<Self> {
        let mailer: Arc<dyn Mailer> = match settings.email_credentials() {
            Some((url, key)) => {
                info!(endpoint = url, "Email delivery enabled");
                Arc::new(HttpMailer::new(url, key, settings.email_timeout())?)
            }
            None => {
                warn!(
                    "EMAIL_SERVICE_URL and EMAIL_API_KEY not set, emails will only be logged"
                );
                Arc::new(LogMailer)
            }
        };

        Ok(Self::new(store, mailer, settings.email_from.clone())
            .with_rate_limit(settings.delivery_rate))
    }

    /// Pace deliveries to `rate` per second; 0 disables pacing.
    pub fn with_rate_limit(mut self, rate: u32) -> Self {
        self.limiter = RateLimiter::new(rate);
        self
    }

    /// Name of the active delivery channel.
    pub fn mailer_name(&self) -> &'static str {
        self.mailer.name()
    }

    /// Deliver a digest of `tools` to every subscriber of `frequency`.
    ///
    /// No-op when there are no tools or no matching subscribers.
    pub async fn notify(&self, tools: &[Tool], frequency: Frequency) -> DeliveryReport {
        let subscribers = match self.store.list_subscribers().await {
            Ok(subscribers) => subscribers,
            Err(e) => {
                error!(%frequency, error = %e, "Failed to load subscribers");
                return DeliveryReport::empty(frequency);
            }
        };

        let targets: Vec<EmailAddress> = subscribers
            .into_iter()
            .filter(|s| s.frequency == frequency)
            .map(|s| s.email)
            .collect();

        if targets.is_empty() || tools.is_empty() {
            info!(
                %frequency,
                subscribers = targets.len(),
                tools = tools.len(),
                "No subscribers or no tools to send"
            );
            return DeliveryReport::empty(frequency);
        }

        info!(%frequency, subscribers = targets.len(), "Sending digests");

        let digest = Arc::new(DigestComposer::render(tools, frequency));

        let handles: Vec<_> = targets
            .iter()
            .map(|email| {
                let mailer = Arc::clone(&self.mailer);
                let limiter = self.limiter.clone();
                let message = EmailMessage {
                    to: email.clone(),
                    from: self.from.clone(),
                    subject: digest.subject.clone(),
                    html: digest.html.clone(),
                    text: digest.text.clone(),
                };

                tokio::spawn(async move {
                    if let Some(limiter) = limiter {
                        limiter.wait().await;
                    }
                    mailer.send(&message).await
                })
            })
            .collect();

        let joined = join_all(handles).await;

        let mut outcomes = Vec::with_capacity(joined.len());
        for (email, joined) in targets.into_iter().zip(joined) {
            let result = joined.unwrap_or_else(|e| Err(DeliveryError::Task(e.to_string())));

            match &result {
                Ok(Delivery::Sent) => debug!(to = %email, "Email sent"),
                Ok(Delivery::Skipped) => debug!(to = %email, "Email skipped"),
                Err(e) => error!(to = %email, error = %e, "Failed to send email"),
            }
            outcomes.push(DeliveryOutcome { email, result });
        }

        let report = DeliveryReport { frequency, outcomes };
        info!(
            %frequency,
            delivered = report.delivered(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Digest delivery finished"
        );
        report
    }

    /// Send a one-tool sample digest to `to`.
    pub async fn send_test_email(&self, to: &EmailAddress) -> DeliveryResult<Delivery> {
        let sample = Tool::from_candidate(
            Candidate::new(
                "Test AI Tool",
                "This is a test email from AI Tools Tracker",
                "https://example.com",
                "Test",
            ),
            Utc::now(),
        );
        let digest = DigestComposer::render(&[sample], Frequency::Immediate);

        let message = EmailMessage {
            to: to.clone(),
            from: self.from.clone(),
            subject: digest.subject,
            html: digest.html,
            text: digest.text,
        };

        self.mailer.send(&message).await.map_err(|e| {
            error!(to = %to, error = %e, "Test email failed");
            e
        })
    }
}
