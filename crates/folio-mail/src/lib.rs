//! Outbound email notifications for Folio contact submissions.
//!
//! [`HttpMailer`] implements [`folio_core::notify::NotificationDispatcher`] by
//! posting a JSON message to a Postmark-style HTTP email API. Rendering lives
//! in [`render`] and escapes every user-supplied value.

mod mailer;

pub mod config;
pub mod error;
pub mod render;

pub use config::MailerConfig;
pub use error::{Error, Result};
pub use mailer::HttpMailer;
