//! Application state shared across handlers.

use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter, SharedRateLimiter};
use mailer::Mailer;
use site_core::{Clock, ContentStore, FormKind};
use std::sync::Arc;
use tracing::debug;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Mail relay (SMTP in production, mock in tests)
    pub mailer: Arc<dyn Mailer>,
    /// Translation bundles, posts, and menu
    pub content: Arc<ContentStore>,
    /// Rate limiter for `/api/contact`
    pub contact_limiter: SharedRateLimiter,
    /// Rate limiter for `/api/feedback`
    pub feedback_limiter: SharedRateLimiter,
}

impl AppState {
    /// Create with a rate limit config and clock.
    ///
    /// Each form gets its own limiter, so a client is never throttled on
    /// one form for submissions to the other.
    pub fn with_rate_limit(
        mailer: Arc<dyn Mailer>,
        content: ContentStore,
        rate_config: RateLimitConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            mailer,
            content: Arc::new(content),
            contact_limiter: Arc::new(RateLimiter::with_clock(rate_config.clone(), clock.clone())),
            feedback_limiter: Arc::new(RateLimiter::with_clock(rate_config, clock)),
        }
    }

    /// Limiter guarding the given form.
    pub fn limiter(&self, kind: FormKind) -> &SharedRateLimiter {
        match kind {
            FormKind::Contact => &self.contact_limiter,
            FormKind::Feedback => &self.feedback_limiter,
        }
    }

    /// Start the rate limiter cleanup background task.
    /// Returns a handle that can be used to cancel the task.
    pub fn start_rate_limiter_cleanup(&self) -> tokio::task::JoinHandle<()> {
        let limiters = [self.contact_limiter.clone(), self.feedback_limiter.clone()];
        let period = self.contact_limiter.config().cleanup_interval();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let purged: usize = limiters.iter().map(|l| l.purge_expired()).sum();
                if purged > 0 {
                    debug!(purged, "Purged expired rate limit entries");
                }
            }
        })
    }
}
