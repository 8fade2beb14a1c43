//! Size and rate limits for the form endpoints.
//!
//! The `#[validate]` derive macro requires literal values in attributes,
//! so the field minimums are duplicated there. Keep both in sync when
//! modifying.

// === Rate Limits ===

/// Admitted submissions per client per window.
pub const DEFAULT_MAX_SUBMISSIONS: u32 = 5;

/// Fixed window length in seconds (15 minutes).
pub const DEFAULT_WINDOW_SECS: u64 = 15 * 60;

/// How often expired rate-limit entries are purged (5 minutes).
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 5 * 60;

// === Payload Limits ===

/// Maximum accepted submission body in bytes (64KB).
///
/// A contact message is a few hundred bytes; anything near this is abuse.
pub const MAX_SUBMISSION_BYTES: usize = 64 * 1024;

// === Field Minimums (chars) ===

/// Name must have at least this many characters.
pub const MIN_NAME_LEN: u64 = 2;

/// Phone must have at least this many characters.
pub const MIN_PHONE_LEN: u64 = 10;

/// Message must have at least this many characters.
pub const MIN_MESSAGE_LEN: u64 = 10;
