//! Outbound mail: message composition and the SMTP relay

use crate::{config::DeliveryConfig, models::ContactSubmission};
use askama::Template;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Every submission is delivered here.
pub const CONTACT_RECIPIENT: &str = "inbox@portfolio.example";

pub const SUBJECT_PREFIX: &str = "Portfolio Contact: ";

/// Implicit-TLS submission port. Anything else negotiates STARTTLS.
const SMTPS_PORT: u16 = 465;

/// Carries the relay's own message text unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<askama::Error> for TransportError {
    fn from(err: askama::Error) -> Self {
        Self(format!("Failed to render contact email: {}", err))
    }
}

impl From<lettre::transport::smtp::Error> for TransportError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self(err.to_string())
    }
}

impl From<lettre::address::AddressError> for TransportError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self(err.to_string())
    }
}

impl From<lettre::error::Error> for TransportError {
    fn from(err: lettre::error::Error) -> Self {
        Self(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// HTML part of the contact email. Field text is escaped by the template.
#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message_lines: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "emails/contact.txt")]
struct ContactTextTemplate<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

pub fn compose_email(submission: &ContactSubmission, sender: &str) -> Result<OutboundEmail, TransportError> {
    let reply_to = submission
        .email
        .parse::<Mailbox>()
        .ok()
        .map(|mailbox| mailbox.to_string());

    let text_body = ContactTextTemplate {
        name: &submission.name,
        email: &submission.email,
        subject: &submission.subject,
        message: &submission.message,
    }
    .render()?;

    let html_body = ContactHtmlTemplate {
        name: &submission.name,
        email: &submission.email,
        subject: &submission.subject,
        message_lines: submission.message.split('\n').collect(),
    }
    .render()?;

    Ok(OutboundEmail {
        from: sender.to_string(),
        to: CONTACT_RECIPIENT.to_string(),
        reply_to,
        subject: format!("{}{}", SUBJECT_PREFIX, submission.subject),
        text_body,
        html_body,
    })
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    /// One delivery attempt. Returns the relay's response summary.
    async fn send(&self, email: &OutboundEmail) -> Result<String, TransportError>;
}

#[derive(Clone)]
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(config: &DeliveryConfig, username: &str, password: &str) -> Result<Self, TransportError> {
        let credentials = Credentials::new(username.to_string(), password.to_string());

        let builder = if config.smtp_port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };

        let mailer = builder
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)))
            .build();

        info!(
            smtp_host = %config.smtp_host,
            smtp_port = config.smtp_port,
            "SMTP relay transport initialized"
        );

        Ok(Self { mailer })
    }

    fn build_message(email: &OutboundEmail) -> Result<Message, TransportError> {
        let mut builder = Message::builder()
            .from(email.from.parse::<Mailbox>()?)
            .to(email.to.parse::<Mailbox>()?)
            .subject(email.subject.clone());

        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(reply_to.parse::<Mailbox>()?);
        }

        let message = builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(email.text_body.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(email.html_body.clone()),
                ),
        )?;

        Ok(message)
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<String, TransportError> {
        let message = Self::build_message(email)?;

        match self.mailer.send(message).await {
            Ok(response) => {
                let summary = format!(
                    "{} {}",
                    response.code(),
                    response.message().collect::<Vec<_>>().join(" ")
                );
                info!(to = %email.to, response = %summary, "Contact email sent successfully");
                Ok(summary)
            }
            Err(e) => {
                error!(error = %e, to = %email.to, "Failed to send contact email via SMTP");
                Err(e.into())
            }
        }
    }
}
