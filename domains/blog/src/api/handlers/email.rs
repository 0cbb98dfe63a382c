//! Contact form handler

use axum::extract::State;
use scribe_common::{Error, Result, ValidatedJson};
use scribe_email::{ContactMessage, EmailError};
use serde::Deserialize;
use validator::Validate;

use crate::api::middleware::BlogState;

/// Contact form submission
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 5000))]
    pub message: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Forward a contact message to the site owner
///
/// **POST /v1/email**
pub async fn send_contact(
    State(state): State<BlogState>,
    ValidatedJson(request): ValidatedJson<ContactRequest>,
) -> Result<&'static str> {
    let message = ContactMessage {
        name: request.name,
        email: request.email,
        message: request.message,
    };

    state
        .mailer
        .send_contact(message)
        .await
        .map_err(|e| match e {
            EmailError::Validation(msg) => Error::Validation(msg),
            other => Error::Upstream(other.to_string()),
        })?;

    Ok("Message Sent.")
}
