//! Delivery strategies, chosen once from configuration

use super::{
    transport::{compose_email, MailTransport, SmtpMailTransport},
    validation::ValidatedSubmission,
};
use crate::{
    config::DeliveryConfig,
    error::{AppError, Result},
    models::{ContactSubmission, DeliveryMode, DeliveryOutcome, FailureKind},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Operational record of a submission that was not mailed.
pub trait SubmissionLog: Send + Sync {
    fn record(&self, submission_id: Uuid, submission: &ContactSubmission);
}

#[derive(Debug, Clone, Default)]
pub struct TracingSubmissionLog;

impl SubmissionLog for TracingSubmissionLog {
    fn record(&self, submission_id: Uuid, submission: &ContactSubmission) {
        info!(
            submission_id = %submission_id,
            name = %submission.name,
            email = %submission.email,
            subject = %submission.subject,
            message_len = submission.message.len(),
            message = %submission.message,
            "Form submission logged (mail credentials not configured)"
        );
    }
}

#[async_trait]
pub trait DeliveryStrategy: Send + Sync {
    fn mode(&self) -> DeliveryMode;

    async fn deliver(&self, submission: ValidatedSubmission) -> DeliveryOutcome;
}

pub struct LoggingStrategy {
    log: Arc<dyn SubmissionLog>,
}

impl LoggingStrategy {
    pub fn new(log: Arc<dyn SubmissionLog>) -> Self {
        Self { log }
    }
}

impl Default for LoggingStrategy {
    fn default() -> Self {
        Self::new(Arc::new(TracingSubmissionLog))
    }
}

#[async_trait]
impl DeliveryStrategy for LoggingStrategy {
    fn mode(&self) -> DeliveryMode {
        DeliveryMode::Logged
    }

    async fn deliver(&self, submission: ValidatedSubmission) -> DeliveryOutcome {
        let submission = submission.into_inner();
        self.log.record(Uuid::new_v4(), &submission);
        DeliveryOutcome::logged(submission)
    }
}

pub struct RelayStrategy {
    transport: Arc<dyn MailTransport>,
    sender: String,
}

impl RelayStrategy {
    pub fn new(transport: Arc<dyn MailTransport>, sender: impl Into<String>) -> Self {
        Self {
            transport,
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl DeliveryStrategy for RelayStrategy {
    fn mode(&self) -> DeliveryMode {
        DeliveryMode::Relayed
    }

    async fn deliver(&self, submission: ValidatedSubmission) -> DeliveryOutcome {
        let email = match compose_email(&submission, &self.sender) {
            Ok(email) => email,
            Err(e) => {
                return DeliveryOutcome::Failed {
                    kind: FailureKind::Unexpected,
                    reason: e.to_string(),
                }
            }
        };

        // Single attempt; the visitor resubmits by hand.
        match self.transport.send(&email).await {
            Ok(_) => DeliveryOutcome::relayed(),
            Err(e) => DeliveryOutcome::Failed {
                kind: FailureKind::Transport,
                reason: e.to_string(),
            },
        }
    }
}

pub fn select_strategy(config: &DeliveryConfig) -> Result<Arc<dyn DeliveryStrategy>> {
    match config.credentials() {
        Some((username, password)) => {
            let transport = SmtpMailTransport::new(config, username, password)
                .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to create SMTP transport: {}", e)))?;
            info!(sender = %username, "Contact submissions will be relayed over SMTP");
            Ok(Arc::new(RelayStrategy::new(Arc::new(transport), username)))
        }
        None => {
            warn!("Email credentials not found, contact submissions will only be logged");
            Ok(Arc::new(LoggingStrategy::default()))
        }
    }
}
