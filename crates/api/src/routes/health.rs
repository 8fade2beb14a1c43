//! Monitoring endpoints.

use axum::{extract::State, http::StatusCode, Json};
use telemetry::{health, metrics, HealthStatus, MetricsSnapshot};

use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /monitoring/health - Full health check.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mailer_connected = state.mailer.is_healthy() || health().mailer.is_healthy();
    let status = if mailer_connected {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Json(HealthResponse {
        status: status.as_str().to_string(),
        mailer_connected,
        submissions_received: metrics().submissions_received(),
        rate_limited_requests: metrics().rate_limited_requests.get(),
    })
}

/// GET /monitoring/health/ready - Readiness probe (form mail can be relayed).
pub async fn ready_handler() -> StatusCode {
    if health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /monitoring/health/live - Liveness probe (service is running).
pub async fn live_handler() -> StatusCode {
    if health().is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /monitoring/metrics - Metrics snapshot.
pub async fn metrics_handler() -> Json<MetricsSnapshot> {
    Json(metrics().snapshot())
}
