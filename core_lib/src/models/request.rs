//! Request and response models

use super::contact::ContactSubmission;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Wire shape of `POST /api/contact`. Absent and `null` fields are accepted
/// here and rejected by the validation gate instead of the JSON parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub subject: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub message: Option<String>,
}

impl ContactRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            subject: Some(subject.into()),
            message: Some(message.into()),
        }
    }
}

impl From<ContactSubmission> for ContactRequest {
    fn from(submission: ContactSubmission) -> Self {
        Self::new(
            submission.name,
            submission.email,
            submission.subject,
            submission.message,
        )
    }
}

/// Success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ContactSubmission>,
}

/// Any body the endpoint can return, as seen by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub data: Option<ContactSubmission>,
}
