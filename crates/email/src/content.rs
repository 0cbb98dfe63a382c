//! Contact-form email content
//!
//! Canonical subject and body for contact messages, shared by the SES and
//! mock services.

use serde::{Deserialize, Serialize};

use crate::EmailMessage;

/// A reader's message from the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Subject line naming the sender
pub fn contact_subject(name: &str) -> String {
    format!("Message from {}", name)
}

/// Plain-text body: the sender's address followed by their message
pub fn contact_text(email: &str, message: &str) -> String {
    format!("{} {}", email, message)
}

impl ContactMessage {
    /// Address the contact message from `from` to `to`
    pub fn into_email(self, from: String, to: String) -> EmailMessage {
        let mut email = EmailMessage::new(
            to,
            from,
            contact_subject(&self.name),
            contact_text(&self.email, &self.message),
        )
        .with_metadata("email_type".to_string(), "contact".to_string());

        if self.email.contains('@') {
            email = email.with_reply_to(self.email);
        }
        email
    }
}
