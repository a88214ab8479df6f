//! Contact submission pipeline: validation gate, delivery strategies and the
//! outbound mail transport.

pub mod service;
pub mod strategy;
pub mod transport;
pub mod validation;

pub use service::ContactService;
pub use strategy::{
    select_strategy, DeliveryStrategy, LoggingStrategy, RelayStrategy, SubmissionLog,
    TracingSubmissionLog,
};
pub use transport::{
    compose_email, MailTransport, OutboundEmail, SmtpMailTransport, TransportError,
    CONTACT_RECIPIENT, SUBJECT_PREFIX,
};
pub use validation::{validate, ValidatedSubmission, MISSING_FIELDS_MESSAGE};
