//! Contact form state machine
//!
//! `Idle -> Submitting -> (Submitted | Idle with an error banner)`. The
//! `Submitted` state is an expiring flag: it reads as `Idle` again once
//! [`SUCCESS_DISPLAY`] has passed, without any timer task.

use super::submitter::{SubmitError, SubmitResponse, Submitter};
use crate::models::ContactRequest;
use std::time::{Duration, Instant};

pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

const LOGGED_MARKER: &str = "Local development mode";
const SENT_TOAST: &str = "Message sent successfully!";
const LOGGED_TOAST: &str = "Message logged";
const REJECTED_FALLBACK: &str = "Failed to send message";
const NETWORK_FALLBACK: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Submitted { since: Instant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
    status: FormStatus,
    error: Option<String>,
    notifications: Vec<Notification>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            message: String::new(),
            status: FormStatus::Idle,
            error: None,
            notifications: Vec::new(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        }
    }

    /// Any edit clears a displayed error.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        *self.slot(field) = value.into();
        self.error = None;
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Whether the success banner is still showing at `now`.
    pub fn is_submitted(&self, now: Instant) -> bool {
        match self.status {
            FormStatus::Submitted { since } => now.saturating_duration_since(since) < SUCCESS_DISPLAY,
            _ => false,
        }
    }

    /// Expires the success banner.
    pub fn tick(&mut self, now: Instant) {
        if let FormStatus::Submitted { .. } = self.status {
            if !self.is_submitted(now) {
                self.status = FormStatus::Idle;
            }
        }
    }

    /// Required-field gate plus the disabled submit control.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && FormField::ALL.iter().all(|field| !self.value(*field).is_empty())
    }

    /// Enters `Submitting` and hands back the payload to send, or `None` when
    /// the form may not be submitted right now.
    pub fn begin_submit(&mut self) -> Option<ContactRequest> {
        if !self.can_submit() {
            return None;
        }

        self.status = FormStatus::Submitting;
        self.error = None;

        Some(ContactRequest::new(
            self.name.clone(),
            self.email.clone(),
            self.subject.clone(),
            self.message.clone(),
        ))
    }

    /// Applies the result of the request started by [`begin_submit`]. Ignored
    /// when no request is in flight.
    ///
    /// [`begin_submit`]: ContactForm::begin_submit
    pub fn complete(&mut self, result: Result<SubmitResponse, SubmitError>, now: Instant) {
        if !self.is_submitting() {
            return;
        }

        match result {
            Ok(response) if response.is_success() => {
                let logged = response
                    .reply
                    .message
                    .as_deref()
                    .is_some_and(|message| message.contains(LOGGED_MARKER));

                if logged {
                    tracing::info!(data = ?response.reply.data, "Form data logged");
                    self.notifications.push(Notification::Success(LOGGED_TOAST.to_string()));
                } else {
                    self.notifications.push(Notification::Success(SENT_TOAST.to_string()));
                }

                for field in FormField::ALL {
                    self.slot(field).clear();
                }
                self.status = FormStatus::Submitted { since: now };
            }
            Ok(response) => {
                let reason = response
                    .reply
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
                self.fail(reason);
            }
            Err(e) => {
                let reason = Some(e.to_string())
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| NETWORK_FALLBACK.to_string());
                self.fail(reason);
            }
        }
    }

    fn fail(&mut self, reason: String) {
        tracing::warn!(reason = %reason, "Error sending message");
        self.status = FormStatus::Idle;
        self.notifications.push(Notification::Error(reason.clone()));
        self.error = Some(reason);
    }

    /// One full submission: gate, single request, result. Returns `false`
    /// when the gate held and nothing was sent.
    pub async fn submit_with(&mut self, submitter: &dyn Submitter) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };

        let result = submitter.submit(&request).await;
        self.complete(result, Instant::now());
        true
    }
}
