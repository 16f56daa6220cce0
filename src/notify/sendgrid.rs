//! HTTP mailer for the SendGrid v3 API.

use tracing::{debug, info};

use super::Mailer;
use super::types::{MailMessage, NotifyError, SendGridPayload};

/// Sends mail through SendGrid's `mail/send` endpoint.
pub struct SendGridMailer {
    api_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl SendGridMailer {
    /// Create a new mailer.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(api_url, api_key, reqwest::blocking::Client::new())
    }

    /// Create a mailer around an existing HTTP client.
    pub fn with_client(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        client: reqwest::blocking::Client,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            client,
        }
    }
}

impl Mailer for SendGridMailer {
    fn send(&self, message: &MailMessage) -> Result<(), NotifyError> {
        let payload = SendGridPayload::from(message);
        debug!("POST {} to {}", self.api_url, message.to);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| NotifyError::ConnectionFailed(e.to_string()))?;

        // SendGrid answers 202 Accepted; anything else means it was not queued.
        let status = response.status();
        if status.as_u16() != 202 {
            let body = response.text().unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("Email accepted for {}", message.to);
        Ok(())
    }
}
