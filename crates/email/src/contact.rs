//! Contact-form delivery
//!
//! Resolves the sender and recipient from the email secret on every send,
//! falling back to the configured addresses for entries the secret lacks.

use std::sync::Arc;

use scribe_secrets::SecretProvider;

use crate::content::ContactMessage;
use crate::{EmailConfig, EmailError, EmailReceipt, EmailService};

const FROM_ENTRY: &str = "emailFrom";
const TO_ENTRY: &str = "emailTo";

/// Sends contact-form messages to the site owner
#[derive(Clone)]
pub struct ContactMailer {
    email: Arc<dyn EmailService>,
    secrets: Arc<dyn SecretProvider>,
    config: EmailConfig,
}

impl ContactMailer {
    pub fn new(
        email: Arc<dyn EmailService>,
        secrets: Arc<dyn SecretProvider>,
        config: EmailConfig,
    ) -> Self {
        Self {
            email,
            secrets,
            config,
        }
    }

    pub async fn send_contact(&self, message: ContactMessage) -> Result<EmailReceipt, EmailError> {
        let bundle = self.secrets.get_secret(&self.config.secret_name).await?;

        let from = bundle
            .get(FROM_ENTRY)
            .filter(|v| !v.is_empty())
            .unwrap_or(self.config.default_from.as_str())
            .to_string();
        let to = bundle
            .get(TO_ENTRY)
            .filter(|v| !v.is_empty())
            .unwrap_or(self.config.default_to.as_str())
            .to_string();

        tracing::info!(sender_name = %message.name, "Sending contact message");
        self.email.send_email(message.into_email(from, to)).await
    }
}
