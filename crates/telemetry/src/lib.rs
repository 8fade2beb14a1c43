//! Telemetry for the site service.
//!
//! Structured logging through `tracing`, plus in-process counters and
//! component health exposed under `/monitoring`.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
