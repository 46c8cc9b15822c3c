//! Mailer configuration, deserialised from the `[mail]` table.

use std::fmt;

use serde::Deserialize;

/// Where and as whom notifications are sent.
///
/// Delivery goes through an HTTP email API, not SMTP: `server_token` is the
/// API's server token and `sender` must be a sender address the API has
/// verified. Mailbox passwords do not belong here; the old SMTP-style keys
/// `account` and `password` are rejected at load time.
///
/// Every field is optional at load time. A missing sender or token is only
/// reported when the first notification is attempted.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailerConfig {
  /// Base URL of the email API; messages are posted to `{api_url}/email`.
  #[serde(default = "default_api_url")]
  pub api_url:      String,
  /// Verified sender address. Also the recipient unless `recipient` is set.
  #[serde(default)]
  pub sender:       Option<String>,
  /// Email API server token, sent in the token header.
  #[serde(default)]
  pub server_token: Option<String>,
  /// Owner address that receives notifications.
  #[serde(default)]
  pub recipient:    Option<String>,
}

fn default_api_url() -> String { "https://api.postmarkapp.com".to_string() }

impl Default for MailerConfig {
  fn default() -> Self {
    Self {
      api_url:      default_api_url(),
      sender:       None,
      server_token: None,
      recipient:    None,
    }
  }
}

impl fmt::Debug for MailerConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MailerConfig")
      .field("api_url", &self.api_url)
      .field("sender", &self.sender)
      .field("server_token", &self.server_token.as_ref().map(|_| "<redacted>"))
      .field("recipient", &self.recipient)
      .finish()
  }
}
