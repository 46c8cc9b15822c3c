//! JSON API for the Folio contact form.
//!
//! Exposes an axum [`Router`] backed by any [`SubmissionStore`] and
//! [`NotificationDispatcher`]. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", folio_api::api_router(state))
//! ```

pub mod contact;
pub mod error;

use std::{sync::Arc, time::Duration};

use axum::{Router, extract::DefaultBodyLimit, routing::any};
use folio_core::{notify::NotificationDispatcher, store::SubmissionStore};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Upper bounds on the two awaited side effects of a submission.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
  pub store: Duration,
  pub mail:  Duration,
}

impl Default for Timeouts {
  fn default() -> Self {
    Self {
      store: Duration::from_secs(10),
      mail:  Duration::from_secs(10),
    }
  }
}

/// Shared state threaded through the contact handler.
pub struct AppState<S, D> {
  pub store:      Arc<S>,
  pub dispatcher: Arc<D>,
  pub timeouts:   Timeouts,
}

impl<S, D> AppState<S, D> {
  pub fn new(store: Arc<S>, dispatcher: Arc<D>) -> Self {
    Self {
      store,
      dispatcher,
      timeouts: Timeouts::default(),
    }
  }

  pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
    self.timeouts = timeouts;
    self
  }
}

impl<S, D> Clone for AppState<S, D> {
  fn clone(&self) -> Self {
    Self {
      store:      Arc::clone(&self.store),
      dispatcher: Arc::clone(&self.dispatcher),
      timeouts:   self.timeouts,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, D>(state: AppState<S, D>) -> Router<()>
where
  S: SubmissionStore + 'static,
  D: NotificationDispatcher + 'static,
{
  Router::new()
    .route("/contact", any(contact::handler::<S, D>))
    .layer(DefaultBodyLimit::max(contact::MAX_BODY_BYTES))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
