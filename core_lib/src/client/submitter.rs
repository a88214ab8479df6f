use crate::models::{ContactRequest, SubmissionReply};
use async_trait::async_trait;
use thiserror::Error;

pub const CONTACT_PATH: &str = "/api/contact";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    pub reply: SubmissionReply,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a readable reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, request: &ContactRequest) -> Result<SubmitResponse, SubmitError>;
}

/// Posts drafts as JSON with reqwest. No timeout beyond the client's own
/// defaults.
#[derive(Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), CONTACT_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, request: &ContactRequest) -> Result<SubmitResponse, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let reply = response
            .json::<SubmissionReply>()
            .await
            .map_err(|e| SubmitError::InvalidResponse(e.to_string()))?;

        tracing::debug!(status, success = reply.success, "Contact endpoint replied");

        Ok(SubmitResponse { status, reply })
    }
}
