//! Contact submission contract shared by the handler and the client

use crate::error::AppError;
use crate::models::request::ContactResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const LOGGED_DETAIL: &str = "Local development mode: Email would be sent in production";
pub const RELAYED_DETAIL: &str = "Email sent successfully";

/// A submission that made it through the required-field gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Relayed,
    Logged,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Relayed => "relayed",
            DeliveryMode::Logged => "logged",
        }
    }
}

impl std::fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The mail relay refused or could not be reached.
    Transport,
    /// Anything else caught at the request boundary.
    Unexpected,
}

/// The single result produced for every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Accepted {
        mode: DeliveryMode,
        detail: String,
        echo: Option<ContactSubmission>,
    },
    Rejected {
        reason: String,
    },
    Failed {
        kind: FailureKind,
        reason: String,
    },
}

impl DeliveryOutcome {
    pub fn logged(submission: ContactSubmission) -> Self {
        DeliveryOutcome::Accepted {
            mode: DeliveryMode::Logged,
            detail: LOGGED_DETAIL.to_string(),
            echo: Some(submission),
        }
    }

    pub fn relayed() -> Self {
        DeliveryOutcome::Accepted {
            mode: DeliveryMode::Relayed,
            detail: RELAYED_DETAIL.to_string(),
            echo: None,
        }
    }

    pub fn mode(&self) -> Option<DeliveryMode> {
        match self {
            DeliveryOutcome::Accepted { mode, .. } => Some(*mode),
            _ => None,
        }
    }
}

impl From<AppError> for DeliveryOutcome {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(reason) => DeliveryOutcome::Rejected { reason },
            AppError::Transport(reason) => DeliveryOutcome::Failed {
                kind: FailureKind::Transport,
                reason,
            },
            AppError::Unexpected(reason) => DeliveryOutcome::Failed {
                kind: FailureKind::Unexpected,
                reason,
            },
            other => DeliveryOutcome::Failed {
                kind: FailureKind::Unexpected,
                reason: other.to_string(),
            },
        }
    }
}

impl IntoResponse for DeliveryOutcome {
    fn into_response(self) -> Response {
        match self {
            DeliveryOutcome::Accepted { detail, echo, .. } => (
                StatusCode::OK,
                Json(ContactResponse {
                    success: true,
                    message: detail,
                    data: echo,
                }),
            )
                .into_response(),
            DeliveryOutcome::Rejected { reason } => AppError::Validation(reason).into_response(),
            DeliveryOutcome::Failed {
                kind: FailureKind::Transport,
                reason,
            } => AppError::Transport(reason).into_response(),
            DeliveryOutcome::Failed {
                kind: FailureKind::Unexpected,
                reason,
            } => AppError::Unexpected(reason).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
        }
    }

    #[test]
    fn test_outcome_status_codes() {
        assert_eq!(DeliveryOutcome::relayed().into_response().status(), StatusCode::OK);
        assert_eq!(
            DeliveryOutcome::Rejected { reason: "x".to_string() }
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DeliveryOutcome::Failed {
                kind: FailureKind::Unexpected,
                reason: "x".to_string()
            }
            .into_response()
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_logged_outcome_echoes_submission() {
        let outcome = DeliveryOutcome::logged(submission());
        assert_eq!(outcome.mode(), Some(DeliveryMode::Logged));
        match outcome {
            DeliveryOutcome::Accepted { detail, echo, .. } => {
                assert!(detail.contains("Local development mode"));
                assert_eq!(echo, Some(submission()));
            }
            other => panic!("expected accepted outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let outcome: DeliveryOutcome = AppError::Transport("SMTP timeout".to_string()).into();
        assert_eq!(
            outcome,
            DeliveryOutcome::Failed {
                kind: FailureKind::Transport,
                reason: "SMTP timeout".to_string()
            }
        );

        let outcome: DeliveryOutcome = AppError::Other(anyhow::anyhow!("boom")).into();
        assert!(matches!(
            outcome,
            DeliveryOutcome::Failed { kind: FailureKind::Unexpected, .. }
        ));
    }

    #[test]
    fn test_delivery_mode_serialization() {
        assert_eq!(serde_json::to_string(&DeliveryMode::Relayed).unwrap(), "\"relayed\"");
        assert_eq!(DeliveryMode::Logged.to_string(), "logged");
    }
}
