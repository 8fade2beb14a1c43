//! Mail relay for the contact and feedback forms.

pub mod config;
pub mod health;
pub mod smtp;

pub use config::*;
pub use smtp::*;

use async_trait::async_trait;
use site_core::{OutgoingMail, Result};

/// Delivers composed form mail.
///
/// Implemented by [`SmtpMailer`] in production and by in-memory mocks in
/// tests. Delivery is awaited by the caller; implementations must not
/// retry or queue.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message.
    ///
    /// `Error::InvalidMail` when the message cannot be built from the
    /// submitted data; any transport failure is `Error::Delivery`.
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;

    /// Whether the last delivery attempt (or startup probe) succeeded.
    fn is_healthy(&self) -> bool;
}
