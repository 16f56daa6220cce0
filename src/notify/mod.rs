//! Approval email for candidate scripts.
//!
//! Renders the scripts as an HTML email and delivers it through a
//! [`Mailer`], by default SendGrid's HTTP API.

mod email;
mod sendgrid;
mod types;

pub use email::{EmailNotifier, build_email_html, email_subject, escape_html};
pub use sendgrid::SendGridMailer;
pub use types::{Address, Content, MailMessage, NotifyError, Personalization, SendGridPayload};

use crate::config::EmailConfig;

/// Trait for outgoing mail delivery.
#[cfg_attr(test, mockall::automock)]
pub trait Mailer {
    /// Deliver one message.
    fn send(&self, message: &MailMessage) -> Result<(), NotifyError>;
}

/// Create the SendGrid mailer, reading the API key from the environment.
pub fn create_mailer(config: &EmailConfig) -> Result<SendGridMailer, NotifyError> {
    let api_key = config
        .api_key()
        .ok_or_else(|| NotifyError::MissingApiKey(config.api_key_env.clone()))?;
    Ok(SendGridMailer::new(config.api_url.clone(), api_key))
}
