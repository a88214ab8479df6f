//! `POST /api/contact`

use crate::{
    error::AppError,
    extractors::ContactJson,
    models::{ContactRequest, DeliveryOutcome},
    AppState,
};
use axum::extract::State;
use tracing::info;

/// Parse failures are folded into the outcome so every request gets one of
/// the three structured bodies.
pub async fn handle_contact(
    State(state): State<AppState>,
    payload: Result<ContactJson<ContactRequest>, AppError>,
) -> DeliveryOutcome {
    let ContactJson(request) = match payload {
        Ok(payload) => payload,
        Err(e) => return e.into(),
    };

    info!(
        subject = request.subject.as_deref().unwrap_or_default(),
        "POST /api/contact"
    );

    state.contact.submit(request).await
}
