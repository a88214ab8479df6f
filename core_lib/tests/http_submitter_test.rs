use async_trait::async_trait;
use axum::{http::StatusCode, response::Html, routing::post, Router};
use core_lib::{
    client::SubmitError,
    contact::{MailTransport, OutboundEmail, RelayStrategy, TransportError},
    create_app, AppState, ContactForm, ContactRequest, ContactService, FormField, FormStatus,
    HttpSubmitter, Notification, Submitter,
};
use std::{sync::Arc, time::Instant};
use tokio::net::TcpListener;

struct FailingTransport;

#[async_trait]
impl MailTransport for FailingTransport {
    async fn send(&self, _email: &OutboundEmail) -> Result<String, TransportError> {
        Err(TransportError::new("SMTP timeout"))
    }
}

/// Serves `app` on an ephemeral port and returns its base URL.
async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn filled_form() -> ContactForm {
    let mut form = ContactForm::new();
    form.edit(FormField::Name, "Jane");
    form.edit(FormField::Email, "jane@x.com");
    form.edit(FormField::Subject, "Hi");
    form.edit(FormField::Message, "Hello");
    form
}

fn assert_fields_kept(form: &ContactForm) {
    assert_eq!(form.value(FormField::Name), "Jane");
    assert_eq!(form.value(FormField::Email), "jane@x.com");
    assert_eq!(form.value(FormField::Subject), "Hi");
    assert_eq!(form.value(FormField::Message), "Hello");
}

#[tokio::test]
async fn test_logged_submission_over_http() {
    let base_url = serve(create_app(AppState::default())).await;
    let submitter = HttpSubmitter::new(&base_url);
    let mut form = filled_form();

    assert!(form.submit_with(&submitter).await);

    assert!(form.is_submitted(Instant::now()));
    assert!(form.error().is_none());
    for field in FormField::ALL {
        assert_eq!(form.value(field), "");
    }
    assert_eq!(
        form.notifications(),
        &[Notification::Success("Message logged".to_string())]
    );
}

#[tokio::test]
async fn test_relay_failure_over_http() {
    let strategy = RelayStrategy::new(Arc::new(FailingTransport), "owner@gmail.com");
    let app = create_app(AppState::new(ContactService::new(Arc::new(strategy))));
    let base_url = serve(app).await;
    let mut form = filled_form();

    assert!(form.submit_with(&HttpSubmitter::new(&base_url)).await);

    assert_eq!(form.status(), FormStatus::Idle);
    assert_eq!(form.error(), Some("Failed to send email"));
    assert_fields_kept(&form);
}

#[tokio::test]
async fn test_rejection_reply_is_read() {
    let base_url = serve(create_app(AppState::default())).await;
    let submitter = HttpSubmitter::new(&base_url);

    let response = submitter
        .submit(&ContactRequest::new("", "jane@x.com", "Hi", "Hello"))
        .await
        .unwrap();

    assert_eq!(response.status, 400);
    assert!(!response.is_success());
    assert_eq!(response.reply.error.as_deref(), Some("Missing required fields"));
}

#[tokio::test]
async fn test_non_json_reply_is_invalid_response() {
    let gateway = Router::new().route(
        "/api/contact",
        post(|| async { (StatusCode::BAD_GATEWAY, Html("<html><body>502 Bad Gateway</body></html>")) }),
    );
    let base_url = serve(gateway).await;
    let submitter = HttpSubmitter::new(&base_url);

    let result = submitter
        .submit(&ContactRequest::new("Jane", "jane@x.com", "Hi", "Hello"))
        .await;
    assert!(matches!(result, Err(SubmitError::InvalidResponse(_))));

    let mut form = filled_form();
    assert!(form.submit_with(&submitter).await);

    assert_eq!(form.status(), FormStatus::Idle);
    assert!(form.error().is_some_and(|error| !error.is_empty()));
    assert!(matches!(form.notifications(), [Notification::Error(_)]));
    assert_fields_kept(&form);
}
