//! Required-field gate in front of every delivery strategy

use crate::{
    error::{AppError, Result},
    models::{ContactRequest, ContactSubmission},
};
use validator::Validate;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

/// A submission with all four fields present. Only [`validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission(ContactSubmission);

impl ValidatedSubmission {
    pub fn submission(&self) -> &ContactSubmission {
        &self.0
    }

    pub fn into_inner(self) -> ContactSubmission {
        self.0
    }
}

impl std::ops::Deref for ValidatedSubmission {
    type Target = ContactSubmission;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Presence check only. Whitespace counts as content and the email address
/// is not parsed.
pub fn validate(request: ContactRequest) -> Result<ValidatedSubmission> {
    if let Err(errors) = request.validate() {
        tracing::debug!(
            fields = ?errors.field_errors().keys().collect::<Vec<_>>(),
            "Contact submission rejected"
        );
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }

    match (request.name, request.email, request.subject, request.message) {
        (Some(name), Some(email), Some(subject), Some(message)) => {
            Ok(ValidatedSubmission(ContactSubmission {
                name,
                email,
                subject,
                message,
            }))
        }
        _ => Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())),
    }
}
