//! Request middleware and per-client throttling.

pub mod locale;
pub mod rate_limit;

pub use locale::locale_redirect;
pub use rate_limit::{RateDecision, RateLimitConfig, RateLimiter, SharedRateLimiter};
