//! Email payload and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when sending the approval email.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("No scripts to send")]
    NoScripts,

    #[error("API key missing: set {0}")]
    MissingApiKey(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Email rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A rendered email ready for a [`super::Mailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// SendGrid v3 `mail/send` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendGridPayload {
    pub personalizations: Vec<Personalization>,
    pub from: Address,
    pub content: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Personalization {
    pub to: Vec<Address>,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

impl From<&MailMessage> for SendGridPayload {
    fn from(message: &MailMessage) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: message.to.clone(),
                }],
                subject: message.subject.clone(),
            }],
            from: Address {
                email: message.from.clone(),
            },
            content: vec![Content {
                content_type: "text/html".to_string(),
                value: message.html.clone(),
            }],
        }
    }
}
