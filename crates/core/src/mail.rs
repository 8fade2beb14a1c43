//! Outgoing mail composed from a form submission.

use serde::{Deserialize, Serialize};

/// A message ready to hand to the mail transport.
///
/// The transport decides the envelope sender and recipient; this only
/// carries what the submitter supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    /// Display name for the `From` header
    pub sender_name: String,
    /// Submitter's address, used as `Reply-To`
    pub reply_to: String,
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Build a plain-text body from labelled fields and a free-text message.
pub(crate) fn compose_body(fields: &[(&str, &str)], message: &str) -> String {
    let mut body = String::new();
    for (label, value) in fields {
        body.push_str(label);
        body.push_str(": ");
        body.push_str(value);
        body.push('\n');
    }
    body.push_str("\nMesaj:\n");
    body.push_str(message);
    body
}
