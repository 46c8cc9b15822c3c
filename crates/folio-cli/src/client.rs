//! Async HTTP client wrapping the Folio JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use folio_core::submission::ContactMessage;
use reqwest::Client;

use crate::form::ContactTransport;

/// Connection settings for the Folio API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the Folio JSON API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `POST /api/contact`
  pub async fn submit_contact(&self, message: &ContactMessage) -> Result<()> {
    let resp = self
      .client
      .post(self.url("/contact"))
      .json(message)
      .send()
      .await
      .context("POST /contact failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /contact → {}", resp.status()));
    }
    Ok(())
  }
}

impl ContactTransport for ApiClient {
  async fn send(&self, message: &ContactMessage) -> Result<()> { self.submit_contact(message).await }
}
