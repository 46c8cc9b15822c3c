//! [`HttpMailer`]: notification delivery over an HTTP email API.

use std::time::Duration;

use folio_core::{notify::NotificationDispatcher, submission::ContactSubmission};
use reqwest::Client;
use serde::Serialize;

use crate::{
  Error, MailerConfig, Result,
  render::{SUBJECT, html_body, sender, text_body},
};

/// Header carrying the API credential.
const TOKEN_HEADER: &str = "X-Postmark-Server-Token";

/// JSON payload posted to `{api_url}/email`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OutboundEmail<'a> {
  from:           String,
  to:             &'a str,
  reply_to:       &'a str,
  subject:        &'a str,
  html_body:      String,
  text_body:      String,
  message_stream: &'a str,
}

/// Sends one email per submission to the configured owner address.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpMailer {
  client: Client,
  config: MailerConfig,
}

impl HttpMailer {
  /// Build a mailer whose requests give up after `timeout`.
  pub fn new(config: MailerConfig, timeout: Duration) -> Result<Self> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String { format!("{}/email", self.config.api_url.trim_end_matches('/')) }

  fn credentials(&self) -> Result<(&str, &str)> {
    let sender = non_empty(&self.config.sender).ok_or(Error::NotConfigured("mail.sender"))?;
    let token =
      non_empty(&self.config.server_token).ok_or(Error::NotConfigured("mail.server_token"))?;
    Ok((sender, token))
  }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl NotificationDispatcher for HttpMailer {
  type Error = Error;

  async fn notify(&self, submission: &ContactSubmission) -> Result<()> {
    let (from, token) = self.credentials()?;
    let recipient = non_empty(&self.config.recipient).unwrap_or(from);

    let email = OutboundEmail {
      from:           sender(from),
      to:             recipient,
      reply_to:       &submission.email,
      subject:        SUBJECT,
      html_body:      html_body(submission),
      text_body:      text_body(submission),
      message_stream: "outbound",
    };

    let resp = self
      .client
      .post(self.url())
      .header(TOKEN_HEADER, token)
      .json(&email)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Rejected { status, body });
    }

    tracing::info!(
      submission_id = %submission.submission_id,
      to = recipient,
      "contact notification sent"
    );
    Ok(())
  }
}
