//! Error type for `folio-store-sqlite`.
//!
//! Every variant means "storage unavailable" to the caller; the detail is for
//! operator logs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no database path configured")]
  Unconfigured,

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
