//! Approval email rendering and sending.

use chrono::NaiveDate;
use tracing::info;

use super::Mailer;
use super::types::{MailMessage, NotifyError};
use crate::config::EmailConfig;
use crate::scripts::CandidateScript;

/// Replace the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Subject line for a given day.
pub fn email_subject(date: NaiveDate) -> String {
    format!("🎬 Scripts du {}", date.format("%d/%m/%Y"))
}

/// Render the approval email body: one card per script with a choose link.
pub fn build_email_html(scripts: &[CandidateScript], date: NaiveDate, approval_url: &str) -> String {
    let mut html = format!(
        r#"<html>
<body style="font-family: Arial; margin: 20px; background: #f5f5f5;">
  <div style="max-width: 600px; margin: 0 auto; background: white; padding: 20px; border-radius: 10px;">
    <div style="background: #4CAF50; color: white; padding: 20px; border-radius: 5px; text-align: center;">
      <h1>🎬 NOUVEAUX SCRIPTS DISPONIBLES</h1>
      <p>Date: {}</p>
    </div>
"#,
        date.format("%d/%m/%Y")
    );

    let link = escape_html(approval_url);
    for (i, script) in scripts.iter().enumerate() {
        html.push_str(&format!(
            r#"    <div style="border: 2px solid #4CAF50; padding: 15px; margin: 15px 0; border-radius: 10px;">
      <h3>Option {}: {}</h3>
      <div style="color: #666; line-height: 1.5; margin: 10px 0; white-space: pre-line;">{}</div>
      <a href="{link}" style="display: block; padding: 12px; background: #4CAF50; color: white; text-align: center; text-decoration: none; border-radius: 5px; font-weight: bold;">✅ CHOISIR CE SCRIPT</a>
    </div>
"#,
            i + 1,
            escape_html(&script.title),
            escape_html(&script.content),
        ));
    }

    html.push_str("  </div>\n</body>\n</html>\n");
    html
}

/// Sends candidate scripts to the reviewer.
pub struct EmailNotifier<M: Mailer> {
    mailer: M,
    config: EmailConfig,
}

impl<M: Mailer> EmailNotifier<M> {
    pub fn new(mailer: M, config: EmailConfig) -> Self {
        Self { mailer, config }
    }

    /// Build the message for `scripts` without sending it.
    pub fn compose(&self, scripts: &[CandidateScript], date: NaiveDate) -> MailMessage {
        MailMessage {
            from: self.config.from.clone(),
            to: self.config.to.clone(),
            subject: email_subject(date),
            html: build_email_html(scripts, date, &self.config.approval_url),
        }
    }

    /// Email the scripts for approval.
    pub fn send_script_approval(
        &self,
        scripts: &[CandidateScript],
        date: NaiveDate,
    ) -> Result<MailMessage, NotifyError> {
        if scripts.is_empty() {
            return Err(NotifyError::NoScripts);
        }

        let message = self.compose(scripts, date);
        info!("Sending {} scripts to {}", scripts.len(), message.to);
        self.mailer.send(&message)?;
        Ok(message)
    }
}
