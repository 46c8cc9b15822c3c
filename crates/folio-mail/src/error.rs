//! Error type for `folio-mail`.
//!
//! Every variant means "delivery unavailable" to the caller.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("mail transport not configured: missing {0}")]
  NotConfigured(&'static str),

  #[error("mail transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("mail API rejected the message with {status}: {body}")]
  Rejected { status: StatusCode, body: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
