//! The `NotificationDispatcher` trait.

use std::future::Future;

use crate::submission::ContactSubmission;

/// Sends the site owner one notification per stored submission.
///
/// A failed notification never affects the already-stored record.
pub trait NotificationDispatcher: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn notify<'a>(
    &'a self,
    submission: &'a ContactSubmission,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
