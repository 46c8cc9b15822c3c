//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; UUIDs as hyphenated lowercase
//! strings.

use chrono::{DateTime, Utc};
use folio_core::submission::ContactSubmission;
use uuid::Uuid;

use crate::{Error, Result};

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// A `submissions` row exactly as read from SQLite.
pub struct RawSubmission {
  pub submission_id: String,
  pub name:          String,
  pub email:         String,
  pub message:       String,
  pub created_at:    String,
}

impl RawSubmission {
  pub fn into_submission(self) -> Result<ContactSubmission> {
    Ok(ContactSubmission {
      submission_id: decode_uuid(&self.submission_id)?,
      name:          self.name,
      email:         self.email,
      message:       self.message,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
