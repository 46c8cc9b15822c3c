//! Contact submissions: the wire shape, the validated input, and the stored
//! record.
//!
//! A [`ContactMessage`] is whatever the caller sent. [`NewSubmission::parse`]
//! turns it into a validated, trimmed value or rejects it; the store then
//! stamps it into an immutable [`ContactSubmission`].

use std::fmt;

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Field ───────────────────────────────────────────────────────────────────

/// One of the three user-editable contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
  Name,
  Email,
  Message,
}

impl Field {
  /// All fields in form order.
  pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

  pub fn as_str(self) -> &'static str {
    match self {
      Field::Name => "name",
      Field::Email => "email",
      Field::Message => "message",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ─── Wire shape ──────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /api/contact`.
///
/// Missing keys deserialise to empty strings so that they are reported by
/// validation rather than as a JSON shape error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
  #[serde(default)]
  pub name:    String,
  #[serde(default)]
  pub email:   String,
  #[serde(default)]
  pub message: String,
}

impl ContactMessage {
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self {
      name:    name.into(),
      email:   email.into(),
      message: message.into(),
    }
  }

  pub fn get(&self, field: Field) -> &str {
    match field {
      Field::Name => &self.name,
      Field::Email => &self.email,
      Field::Message => &self.message,
    }
  }

  pub fn get_mut(&mut self, field: Field) -> &mut String {
    match field {
      Field::Name => &mut self.name,
      Field::Email => &mut self.email,
      Field::Message => &mut self.message,
    }
  }
}

// ─── Validated input ─────────────────────────────────────────────────────────

/// A submission that passed validation and has not been stored yet.
///
/// The only way to build one is [`NewSubmission::parse`], so every value of
/// this type has three non-empty trimmed fields and a well-formed email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
  name:    String,
  email:   String,
  message: String,
}

impl NewSubmission {
  /// Trim and validate a raw [`ContactMessage`].
  ///
  /// Fields are checked in form order; the first failure is returned.
  pub fn parse(raw: ContactMessage) -> Result<Self> {
    let name = required(raw.name, Field::Name)?;
    let email = required(raw.email, Field::Email)?;
    let message = required(raw.message, Field::Message)?;

    if !EmailAddress::is_valid(&email) {
      return Err(Error::InvalidEmail(email));
    }

    Ok(Self { name, email, message })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn email(&self) -> &str { &self.email }

  pub fn message(&self) -> &str { &self.message }

  /// Stamp the submission with its identity and timestamp.
  /// Called by store backends at persistence time.
  pub fn into_record(self, submission_id: Uuid, created_at: DateTime<Utc>) -> ContactSubmission {
    ContactSubmission {
      submission_id,
      name: self.name,
      email: self.email,
      message: self.message,
      created_at,
    }
  }
}

fn required(value: String, field: Field) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::MissingField(field));
  }
  Ok(trimmed.to_owned())
}

// ─── Stored record ───────────────────────────────────────────────────────────

/// A persisted contact submission. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
  pub submission_id: Uuid,
  pub name:          String,
  pub email:         String,
  pub message:       String,
  /// Server-assigned; non-decreasing in insertion order.
  pub created_at:    DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_trims_all_fields() {
    let sub = NewSubmission::parse(ContactMessage::new(
      "  Ada ",
      " ada@example.com\n",
      "\tHello  ",
    ))
    .unwrap();
    assert_eq!(sub.name(), "Ada");
    assert_eq!(sub.email(), "ada@example.com");
    assert_eq!(sub.message(), "Hello");
  }

  #[test]
  fn parse_rejects_blank_fields_in_form_order() {
    let err = NewSubmission::parse(ContactMessage::new("", "", "")).unwrap_err();
    assert_eq!(err, Error::MissingField(Field::Name));

    let err =
      NewSubmission::parse(ContactMessage::new("Ada", "   ", "Hello")).unwrap_err();
    assert_eq!(err, Error::MissingField(Field::Email));

    let err = NewSubmission::parse(ContactMessage::new(
      "Ada",
      "ada@example.com",
      " \n\t ",
    ))
    .unwrap_err();
    assert_eq!(err, Error::MissingField(Field::Message));
  }

  #[test]
  fn parse_rejects_malformed_email() {
    let err = NewSubmission::parse(ContactMessage::new("Ada", "not-an-email", "Hello"))
      .unwrap_err();
    assert_eq!(err, Error::InvalidEmail("not-an-email".into()));
  }

  #[test]
  fn missing_json_keys_become_empty_strings() {
    let raw: ContactMessage = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
    assert_eq!(raw.email, "");
    assert_eq!(
      NewSubmission::parse(raw).unwrap_err(),
      Error::MissingField(Field::Email)
    );
  }

  #[test]
  fn into_record_keeps_validated_values() {
    let id = Uuid::new_v4();
    let at = Utc::now();
    let record = NewSubmission::parse(ContactMessage::new("Ada", "ada@example.com", "Hello"))
      .unwrap()
      .into_record(id, at);
    assert_eq!(record.submission_id, id);
    assert_eq!(record.created_at, at);
    assert_eq!(record.name, "Ada");
  }

  #[test]
  fn field_accessors_cover_every_field() {
    let mut msg = ContactMessage::default();
    for field in Field::ALL {
      msg.get_mut(field).push_str(field.as_str());
    }
    assert_eq!(msg.get(Field::Name), "name");
    assert_eq!(msg.get(Field::Email), "email");
    assert_eq!(msg.get(Field::Message), "message");
  }
}
