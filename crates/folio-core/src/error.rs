//! Error types for `folio-core`.

use thiserror::Error;

use crate::submission::Field;

/// A submission was rejected before any side effect took place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("{0} is required")]
  MissingField(Field),

  #[error("email address {0:?} is not valid")]
  InvalidEmail(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
