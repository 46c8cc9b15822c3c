//! The contact form controller: field state and the submission lifecycle.
//!
//! ```text
//! idle ──submit()──▶ submitting ──2xx──────────▶ idle (fields cleared, Success)
//!                        │
//!                        └──error / non-2xx──▶ idle (fields kept, Failure)
//! ```
//!
//! All methods take `&self` so a form can be shared between the UI loop and a
//! spawned submit task. A `submit()` that arrives while another is in flight
//! returns [`SubmitResult::Ignored`] without touching the network.

use std::{
  future::Future,
  sync::{Mutex, MutexGuard, PoisonError},
};

use folio_core::submission::{ContactMessage, Field};

// ─── Transport ────────────────────────────────────────────────────────────────

/// Delivers one contact message to the server.
///
/// `Ok` means the server answered with a success status; anything else
/// (unreachable, non-2xx) is an error.
pub trait ContactTransport: Send + Sync {
  fn send<'a>(
    &'a self,
    message: &'a ContactMessage,
  ) -> impl Future<Output = anyhow::Result<()>> + Send + 'a;
}

// ─── Outcomes ─────────────────────────────────────────────────────────────────

/// One-shot user-visible result of the last submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
  Success,
  Failure,
}

impl Alert {
  pub fn text(self) -> &'static str {
    match self {
      Alert::Success => "Message sent successfully!",
      Alert::Failure => "Failed to send message",
    }
  }
}

/// What a call to [`ContactForm::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
  Sent,
  Failed,
  /// Another submission was already in flight; nothing was sent.
  Ignored,
}

// ─── Controller ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct FormState {
  fields:     ContactMessage,
  submitting: bool,
  alert:      Option<Alert>,
}

pub struct ContactForm<T> {
  transport: T,
  state:     Mutex<FormState>,
}

impl<T: ContactTransport> ContactForm<T> {
  pub fn new(transport: T) -> Self {
    Self {
      transport,
      state: Mutex::default(),
    }
  }

  fn lock(&self) -> MutexGuard<'_, FormState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Replace the value of one field.
  pub fn update_field(&self, field: Field, value: impl Into<String>) {
    *self.lock().fields.get_mut(field) = value.into();
  }

  /// Edit one field in place (keystroke-level edits from the UI).
  pub fn edit_field(&self, field: Field, edit: impl FnOnce(&mut String)) {
    edit(self.lock().fields.get_mut(field));
  }

  pub fn field(&self, field: Field) -> String { self.lock().fields.get(field).to_owned() }

  pub fn fields(&self) -> ContactMessage { self.lock().fields.clone() }

  pub fn is_submitting(&self) -> bool { self.lock().submitting }

  /// The outcome of the last finished submission, at most once.
  pub fn take_alert(&self) -> Option<Alert> { self.lock().alert.take() }

  /// Send the current fields, once. No retry.
  pub async fn submit(&self) -> SubmitResult {
    let snapshot = {
      let mut state = self.lock();
      if state.submitting {
        return SubmitResult::Ignored;
      }
      state.submitting = true;
      state.fields.clone()
    };

    let outcome = self.transport.send(&snapshot).await;

    let mut state = self.lock();
    state.submitting = false;
    match outcome {
      Ok(()) => {
        state.fields = ContactMessage::default();
        state.alert = Some(Alert::Success);
        SubmitResult::Sent
      }
      Err(e) => {
        tracing::warn!(error = %e, "contact submission failed");
        state.alert = Some(Alert::Failure);
        SubmitResult::Failed
      }
    }
  }
}
