//! Unified error types for the site service.
//!
//! Status mapping:
//! - 400: validation, payload decoding, and unbuildable mail errors
//! - 404: unknown locale or page
//! - 429: rate limit exceeded
//! - 500: mail transport, configuration, and internal errors

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the site service.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("mail delivery failed: {0}")]
    Delivery(String),

    /// Submitted data cannot be turned into a message; the transport was
    /// never contacted.
    #[error("invalid mail: {0}")]
    InvalidMail(String),

    #[error("locale not found: {0}")]
    LocaleNotFound(String),

    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery(msg.into())
    }

    pub fn invalid_mail(msg: impl Into<String>) -> Self {
        Self::InvalidMail(msg.into())
    }

    pub fn locale_not_found(locale: impl Into<String>) -> Self {
        Self::LocaleNotFound(locale.into())
    }

    pub fn page_not_found(page: impl Into<String>) -> Self {
        Self::PageNotFound(page.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Serialization(_) => 400,
            Self::InvalidMail(_) => 400,
            Self::LocaleNotFound(_) => 404,
            Self::PageNotFound(_) => 404,
            Self::RateLimited { .. } => 429,
            Self::Delivery(_) => 500,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Whether this error means the requested page does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LocaleNotFound(_) | Self::PageNotFound(_))
    }
}
