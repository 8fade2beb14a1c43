//! Fixed-window rate limiting for the form endpoints.
//!
//! Each client gets `max_requests` admissions per window. The window opens
//! on the client's first request and is replaced by a fresh one on the
//! first request after it has elapsed. A client can therefore burst up to
//! twice the limit across a window boundary.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use site_core::limits::{DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_MAX_SUBMISSIONS, DEFAULT_WINDOW_SECS};
use site_core::{Clock, SystemClock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Rate limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Admissions per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// How often expired entries are purged
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

fn default_max_requests() -> u32 {
    DEFAULT_MAX_SUBMISSIONS
}

fn default_window_secs() -> u64 {
    DEFAULT_WINDOW_SECS
}

fn default_cleanup_interval_secs() -> u64 {
    DEFAULT_CLEANUP_INTERVAL_SECS
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Admitted; `count` is the client's count in the current window.
    Allowed { count: u32 },
    /// Rejected until the window resets.
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Whole seconds until the window resets, rounded up.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Limited { retry_after } => {
                Some(retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0))
            }
            Self::Allowed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// Per-client fixed-window counter.
///
/// Check-and-increment happens under one lock, so concurrent requests
/// from the same client cannot push its count past the limit.
pub struct RateLimiter {
    entries: Mutex<HashMap<String, WindowEntry>>,
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
            clock,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Check if request is allowed for the given key.
    pub fn check(&self, key: &str) -> bool {
        self.decide(key).is_allowed()
    }

    /// Check and record a request for the given key.
    pub fn decide(&self, key: &str) -> RateDecision {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get_mut(key) {
            if now <= entry.reset_at {
                if entry.count >= self.config.max_requests {
                    return RateDecision::Limited {
                        retry_after: entry.reset_at.saturating_duration_since(now),
                    };
                }
                entry.count += 1;
                return RateDecision::Allowed { count: entry.count };
            }
        }

        // First request, or the previous window has elapsed
        entries.insert(
            key.to_string(),
            WindowEntry {
                count: 1,
                reset_at: now + self.config.window(),
            },
        );
        RateDecision::Allowed { count: 1 }
    }

    /// Count in the client's active window; `None` if absent or expired.
    pub fn count(&self, key: &str) -> Option<u32> {
        let now = self.clock.now();
        self.entries
            .lock()
            .get(key)
            .filter(|entry| now <= entry.reset_at)
            .map(|entry| entry.count)
    }

    /// Drop entries whose window has elapsed. Returns how many were removed.
    ///
    /// An expired entry would be replaced on the client's next request
    /// anyway, so purging never changes a decision.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.reset_at);
        before - entries.len()
    }

    /// Number of tracked clients, expired entries included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared rate limiter state.
pub type SharedRateLimiter = Arc<RateLimiter>;
