//! Common test setup functions.

use api::{middleware::RateLimitConfig, router, AppState};
use axum::Router;
use mailer::Mailer;
use site_core::{ContentStore, Locale, ManualClock, OutgoingMail};
use std::sync::Arc;
use std::time::Duration;

use crate::fixtures;
use crate::mocks::MockMailer;

/// Slug of the post every test context carries.
pub const TEST_POST_SLUG: &str = "trabzon-ortahisar-gezi-rehberi";

/// Test context with a mock mailer and a hand-driven clock.
///
/// This exercises the same production code paths by:
/// - Using the real Axum router with all middleware
/// - Using MockMailer which implements the Mailer trait
/// - Using ManualClock so window expiry needs no sleeping
pub struct TestContext {
    pub clock: ManualClock,
    pub mock_mailer: Arc<MockMailer>,
    pub router: Router,
}

impl TestContext {
    /// Create a context with the default limit (5 per 15 minutes).
    pub fn new() -> Self {
        Self::with_rate_limit(RateLimitConfig::default())
    }

    /// Create a context with a custom rate limit.
    ///
    /// Content has Turkish and English bundles only, so Arabic pages
    /// exercise the missing-bundle path.
    pub fn with_rate_limit(config: RateLimitConfig) -> Self {
        let clock = ManualClock::new();
        let mock_mailer = Arc::new(MockMailer::new());

        let content = ContentStore::new()
            .with_translations(Locale::Tr, fixtures::translations("tr"))
            .with_translations(Locale::En, fixtures::translations("en"))
            .with_menu(fixtures::menu())
            .with_post(TEST_POST_SLUG, fixtures::post("Ortahisar Gezi Rehberi"));

        let state = AppState::with_rate_limit(
            mock_mailer.clone() as Arc<dyn Mailer>,
            content,
            config,
            Arc::new(clock.clone()),
        );
        let router = router(state);

        Self {
            clock,
            mock_mailer,
            router,
        }
    }

    /// Move the limiter clock forward.
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Get all mail captured by the mock mailer.
    pub fn captured_mail(&self) -> Vec<OutgoingMail> {
        self.mock_mailer.captured_mail()
    }

    /// Get count of captured mail.
    pub fn captured_mail_count(&self) -> usize {
        self.mock_mailer.mail_count()
    }

    /// Set the mock mailer to fail (for error testing).
    pub fn set_mailer_failure(&self, should_fail: bool) {
        self.mock_mailer.set_should_fail(should_fail);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
