//! Client side of the contact pipeline: the form state machine and the
//! submitters that carry a draft to the endpoint.

pub mod form;
pub mod submitter;

pub use form::{ContactForm, FormField, FormStatus, Notification, SUCCESS_DISPLAY};
pub use submitter::{HttpSubmitter, SubmitError, SubmitResponse, Submitter};
