//! Notification rendering.
//!
//! User-supplied values are always passed through [`escape`] before they are
//! embedded in HTML.

use folio_core::submission::ContactSubmission;
use quick_xml::escape::escape;

/// Fixed subject line of every notification.
pub const SUBJECT: &str = "📩 New Portfolio Contact Message";

/// Display name used in the `From` header.
pub const SENDER_NAME: &str = "Portfolio Contact";

/// `"Portfolio Contact" <address>`
pub fn sender(address: &str) -> String { format!("\"{SENDER_NAME}\" <{address}>") }

/// HTML body embedding the three fields, escaped.
pub fn html_body(submission: &ContactSubmission) -> String {
  let name = escape(submission.name.as_str());
  let email = escape(submission.email.as_str());
  let message = escape(submission.message.as_str()).replace('\n', "<br>\n");

  format!(
    r#"<div style="font-family: Arial, sans-serif; line-height: 1.6">
  <h2>New Contact Message</h2>
  <p><strong>Name:</strong> {name}</p>
  <p><strong>Email:</strong> {email}</p>
  <p><strong>Message:</strong></p>
  <p>{message}</p>
</div>
"#
  )
}

/// Plain-text alternative body.
pub fn text_body(submission: &ContactSubmission) -> String {
  format!(
    "New Contact Message\n\nName: {}\nEmail: {}\n\n{}\n",
    submission.name, submission.email, submission.message
  )
}
