//! Form submission payloads for the contact and feedback endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{Error, Result};
use crate::limits::MAX_SUBMISSION_BYTES;
use crate::mail::{compose_body, OutgoingMail};

/// Which form a submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Contact,
    Feedback,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Feedback => "feedback",
        }
    }
}

/// A validated form payload that can be relayed as mail.
pub trait Submission: DeserializeOwned + Validate + Send {
    const KIND: FormKind;

    /// Compose the message relayed to the site's inbox.
    fn to_mail(&self) -> OutgoingMail;
}

/// Contact form payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 2, message = "Ad soyad en az 2 karakter olmalıdır"))]
    pub name: String,
    #[validate(
        email(message = "Geçerli bir e-posta adresi girin"),
        custom(function = "dot_atom_local_part", message = "Geçerli bir e-posta adresi girin")
    )]
    pub email: String,
    #[validate(length(min = 10, message = "Geçerli bir telefon numarası girin"))]
    pub phone: String,
    #[validate(length(min = 10, message = "Mesaj en az 10 karakter olmalıdır"))]
    pub message: String,
}

impl Submission for ContactSubmission {
    const KIND: FormKind = FormKind::Contact;

    fn to_mail(&self) -> OutgoingMail {
        OutgoingMail {
            sender_name: self.name.clone(),
            reply_to: self.email.clone(),
            subject: "Yeni İletişim Formu Mesajı".to_string(),
            body: compose_body(
                &[
                    ("Ad Soyad", self.name.as_str()),
                    ("E-posta", self.email.as_str()),
                    ("Telefon", self.phone.as_str()),
                ],
                &self.message,
            ),
        }
    }
}

/// Feedback category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Complaint,
    Suggestion,
}

impl FeedbackCategory {
    /// Turkish label used in the relayed mail.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Complaint => "Şikayet",
            Self::Suggestion => "Öneri",
        }
    }
}

/// Feedback form payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackSubmission {
    #[validate(length(min = 2, message = "Ad soyad en az 2 karakter olmalıdır"))]
    pub name: String,
    #[validate(
        email(message = "Geçerli bir e-posta adresi girin"),
        custom(function = "dot_atom_local_part", message = "Geçerli bir e-posta adresi girin")
    )]
    pub email: String,
    #[validate(length(min = 10, message = "Geçerli bir telefon numarası girin"))]
    pub phone: String,
    pub category: FeedbackCategory,
    #[validate(length(min = 10, message = "Mesaj en az 10 karakter olmalıdır"))]
    pub message: String,
}

impl Submission for FeedbackSubmission {
    const KIND: FormKind = FormKind::Feedback;

    fn to_mail(&self) -> OutgoingMail {
        let label = self.category.label();
        OutgoingMail {
            sender_name: self.name.clone(),
            reply_to: self.email.clone(),
            subject: format!("Yeni Geri Bildirim ({})", label),
            body: compose_body(
                &[
                    ("Ad Soyad", self.name.as_str()),
                    ("E-posta", self.email.as_str()),
                    ("Telefon", self.phone.as_str()),
                    ("Kategori", label),
                ],
                &self.message,
            ),
        }
    }
}

/// Reject local parts with leading, trailing, or doubled dots.
///
/// The `email` rule allows dots anywhere before the `@`, but mail headers
/// need a dot-atom there, so `a..b@example.com` would pass validation and
/// then fail when the message is built.
fn dot_atom_local_part(email: &str) -> std::result::Result<(), ValidationError> {
    let local = email.rsplit_once('@').map_or(email, |(local, _)| local);
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(ValidationError::new("email_local_part"));
    }
    Ok(())
}

/// Decode and validate a submission body.
///
/// Oversized bodies, malformed JSON, missing fields, wrong types, and
/// field rule violations all map to `Error::Validation`.
pub fn parse_submission<S: Submission>(body: &[u8]) -> Result<S> {
    if body.len() > MAX_SUBMISSION_BYTES {
        return Err(Error::validation(format!(
            "payload size {}KB exceeds {}KB limit",
            body.len() / 1024,
            MAX_SUBMISSION_BYTES / 1024
        )));
    }

    let submission: S = serde_json::from_slice(body)
        .map_err(|e| Error::validation(format!("invalid {} payload: {}", S::KIND.as_str(), e)))?;

    submission
        .validate()
        .map_err(|e| Error::validation(e.to_string()))?;

    Ok(submission)
}
