//! In-process metrics.
//!
//! Counters and latency histograms kept in atomics and exposed as a JSON
//! snapshot on `/monitoring/metrics`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Histogram for latency tracking.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 10ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s, 30s, 60s
    buckets: [AtomicU64; 11],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    // SMTP round trips are slow; bounds reach the transport's own timeout.
    const BUCKET_BOUNDS: [u64; 11] = [10, 50, 100, 250, 500, 1000, 2500, 5000, 10000, 30000, 60000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        let idx = Self::BUCKET_BOUNDS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(Self::BUCKET_BOUNDS.len() - 1);
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }

    /// Returns `(upper bound ms, count)` pairs.
    pub fn buckets(&self) -> Vec<(u64, u64)> {
        Self::BUCKET_BOUNDS
            .iter()
            .zip(self.buckets.iter())
            .map(|(&bound, count)| (bound, count.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Collected metrics for the site service.
#[derive(Debug, Default)]
pub struct Metrics {
    // Form endpoints
    pub contact_submissions: Counter,
    pub feedback_submissions: Counter,
    pub validation_failures: Counter,
    pub rate_limited_requests: Counter,

    // Mail relay
    pub mails_sent: Counter,
    pub mail_errors: Counter,
    pub mail_latency_ms: Histogram,

    // Pages
    pub locale_redirects: Counter,
    pub pages_served: Counter,
    pub pages_not_found: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total submissions across both forms.
    pub fn submissions_received(&self) -> u64 {
        self.contact_submissions.get() + self.feedback_submissions.get()
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub contact_submissions: u64,
    pub feedback_submissions: u64,
    pub validation_failures: u64,
    pub rate_limited_requests: u64,
    pub mails_sent: u64,
    pub mail_errors: u64,
    pub mail_latency_mean_ms: f64,
    pub mail_latency_buckets: Vec<(u64, u64)>,
    pub locale_redirects: u64,
    pub pages_served: u64,
    pub pages_not_found: u64,
}

impl Metrics {
    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            contact_submissions: self.contact_submissions.get(),
            feedback_submissions: self.feedback_submissions.get(),
            validation_failures: self.validation_failures.get(),
            rate_limited_requests: self.rate_limited_requests.get(),
            mails_sent: self.mails_sent.get(),
            mail_errors: self.mail_errors.get(),
            mail_latency_mean_ms: self.mail_latency_ms.mean(),
            mail_latency_buckets: self.mail_latency_ms.buckets(),
            locale_redirects: self.locale_redirects.get(),
            pages_served: self.pages_served.get(),
            pages_not_found: self.pages_not_found.get(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
