//! JSON extractor whose rejections use the endpoint's error body

use crate::error::AppError;
use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// Parses the body as JSON whatever the `Content-Type` says. A body that
/// cannot be read or decoded becomes an [`AppError::Unexpected`] instead of
/// axum's plain-text rejection.
pub struct ContactJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ContactJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!(status = %rejection.status(), "Failed to read contact payload");
            AppError::Unexpected(rejection.body_text())
        })?;

        serde_json::from_slice(&bytes).map(ContactJson).map_err(|e| {
            tracing::warn!(error = %e, "Rejected contact payload");
            AppError::Unexpected(e.to_string())
        })
    }
}
