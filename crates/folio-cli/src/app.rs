//! Application state and key dispatcher for the terminal contact form.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::submission::Field;

use crate::form::{ContactForm, ContactTransport};

/// Top-level application state.
pub struct App<T> {
  /// The form controller, shared with in-flight submit tasks.
  pub form: Arc<ContactForm<T>>,

  /// Field receiving keystrokes.
  pub focus: Field,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Server the form submits to, shown in the header.
  pub server: String,
}

impl<T> App<T>
where
  T: ContactTransport + 'static,
{
  pub fn new(form: ContactForm<T>, server: impl Into<String>) -> Self {
    Self {
      form: Arc::new(form),
      focus: Field::Name,
      status_msg: String::new(),
      server: server.into(),
    }
  }

  /// Move a finished submission's alert into the status bar.
  pub fn poll_alert(&mut self) {
    if let Some(alert) = self.form.take_alert() {
      self.status_msg = alert.text().to_string();
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      KeyCode::Char('c') if ctrl => return false,
      KeyCode::Esc => return false,

      KeyCode::Char('s') if ctrl => self.submit(),

      // Editing is locked while a submission is in flight.
      KeyCode::Enter | KeyCode::Backspace | KeyCode::Char(_) if self.form.is_submitting() => {}

      // Focus
      KeyCode::Tab | KeyCode::Down => self.focus = next(self.focus),
      KeyCode::BackTab | KeyCode::Up => self.focus = prev(self.focus),
      KeyCode::Enter if self.focus == Field::Message => {
        self.form.edit_field(Field::Message, |m| m.push('\n'));
      }
      KeyCode::Enter => self.focus = next(self.focus),

      // Editing
      KeyCode::Backspace => {
        self.form.edit_field(self.focus, |v| {
          v.pop();
        });
      }
      KeyCode::Char(c) if !ctrl => {
        self.form.edit_field(self.focus, |v| v.push(c));
      }

      _ => {}
    }
    true
  }

  /// Start a submission on a background task so the UI keeps drawing.
  fn submit(&mut self) {
    if self.form.is_submitting() {
      return;
    }
    self.status_msg = "Sending…".into();
    let form = Arc::clone(&self.form);
    tokio::spawn(async move { form.submit().await });
  }
}

fn next(field: Field) -> Field {
  match field {
    Field::Name => Field::Email,
    Field::Email => Field::Message,
    Field::Message => Field::Name,
  }
}

fn prev(field: Field) -> Field {
  match field {
    Field::Name => Field::Message,
    Field::Email => Field::Name,
    Field::Message => Field::Email,
  }
}
