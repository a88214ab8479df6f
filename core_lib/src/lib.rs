//! Core library for the portfolio contact service: the submission contract,
//! the delivery pipeline behind `POST /api/contact`, and the form client that
//! drives it.

pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;

pub use client::{ContactForm, FormField, FormStatus, HttpSubmitter, Notification, Submitter};
pub use config::{AppConfig, DeliveryConfig};
pub use contact::{select_strategy, ContactService, DeliveryStrategy, MailTransport};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use models::{ContactRequest, ContactSubmission, DeliveryMode, DeliveryOutcome};

use crate::config::CorsConfig;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use std::{any::Any, net::SocketAddr};
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub contact: ContactService,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ContactService::default())
    }
}

impl AppState {
    pub fn new(contact: ContactService) -> Self {
        Self {
            app_name: "Portfolio Contact Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let strategy = select_strategy(&config.mail)?;
        Ok(Self::new(ContactService::new(strategy)))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: AppConfig) -> Router {
    let mut router = Router::new().merge(create_routes());

    router = with_boundary_layers(router, &config.cors);

    router = middleware::logging::with_request_logging(router);

    router.with_state(state)
}

/// Panic containment inside CORS, so a panic's 500 still carries the CORS
/// headers a cross-origin page needs to read it.
fn with_boundary_layers<S>(router: Router<S>, cors: &CorsConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::cors::cors_layer_from_config(cors))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    tracing::error!(details = %details, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "error": error::UNEXPECTED_FAILURE_MESSAGE,
            "details": details,
        })),
    )
        .into_response()
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // In-flight relay calls finish before the process exits.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_panics_become_structured_errors() {
        async fn boom() -> &'static str {
            panic!("exploded")
        }

        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));

        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Server error processing request");
        assert_eq!(json["details"], "exploded");
    }

    #[tokio::test]
    async fn test_panic_response_carries_cors_headers() {
        async fn boom() -> &'static str {
            panic!("exploded")
        }

        let app = with_boundary_layers(
            Router::new().route("/boom", get(boom)),
            &CorsConfig::default(),
        );

        let request = Request::builder()
            .uri("/boom")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let app = create_app(AppState::default());
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["endpoints"]["contact"], "/api/contact");
    }
}
