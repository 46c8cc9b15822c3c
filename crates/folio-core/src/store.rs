//! The `SubmissionStore` trait.
//!
//! Implemented by storage backends (e.g. `folio-store-sqlite`). The API layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::submission::{ContactSubmission, NewSubmission};

/// Append-only persistence for contact submissions.
///
/// There are no update or delete operations. Backends own their connection
/// lifecycle; a connection that cannot be established is reported through
/// `Self::Error` on the call that needed it.
pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `input` and return the stored record.
  /// `submission_id` and `created_at` are assigned by the store.
  fn create(
    &self,
    input: NewSubmission,
  ) -> impl Future<Output = Result<ContactSubmission, Self::Error>> + Send + '_;

  /// All stored submissions in insertion order.
  fn list(&self) -> impl Future<Output = Result<Vec<ContactSubmission>, Self::Error>> + Send + '_;
}
