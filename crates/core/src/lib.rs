//! Core types for the Modatepe site service.
//!
//! Locale routing decisions, form submission payloads, outgoing mail
//! composition, localized API messages, and the content store.

pub mod clock;
pub mod content;
pub mod error;
pub mod limits;
pub mod locale;
pub mod mail;
pub mod messages;
pub mod routing;
pub mod submission;

pub use clock::*;
pub use content::*;
pub use error::{Error, Result};
pub use locale::*;
pub use mail::*;
pub use messages::*;
pub use routing::*;
pub use submission::*;
