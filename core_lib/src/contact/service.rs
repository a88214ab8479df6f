use super::{
    strategy::{DeliveryStrategy, LoggingStrategy},
    validation::validate,
};
use crate::models::{ContactRequest, DeliveryMode, DeliveryOutcome};
use std::sync::Arc;
use tracing::{info, warn};

/// Stateless handler core: gate, then the configured strategy.
#[derive(Clone)]
pub struct ContactService {
    strategy: Arc<dyn DeliveryStrategy>,
}

impl ContactService {
    pub fn new(strategy: Arc<dyn DeliveryStrategy>) -> Self {
        Self { strategy }
    }

    pub fn mode(&self) -> DeliveryMode {
        self.strategy.mode()
    }

    #[tracing::instrument(skip_all, fields(mode = %self.strategy.mode()))]
    pub async fn submit(&self, request: ContactRequest) -> DeliveryOutcome {
        let submission = match validate(request) {
            Ok(submission) => submission,
            Err(e) => return e.into(),
        };

        let outcome = self.strategy.deliver(submission).await;

        match &outcome {
            DeliveryOutcome::Accepted { mode, .. } => info!(mode = %mode, "Contact submission accepted"),
            DeliveryOutcome::Rejected { reason } => warn!(reason = %reason, "Contact submission rejected"),
            DeliveryOutcome::Failed { reason, .. } => warn!(reason = %reason, "Contact submission failed"),
        }

        outcome
    }
}

impl Default for ContactService {
    fn default() -> Self {
        Self::new(Arc::new(LoggingStrategy::default()))
    }
}
