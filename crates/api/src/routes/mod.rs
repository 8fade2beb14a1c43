//! API routes.

pub mod forms;
pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use site_core::limits::MAX_SUBMISSION_BYTES;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::locale_redirect;
use crate::state::AppState;

/// Creates the site router.
///
/// The locale redirect wraps every route and the fallback, so it runs
/// before any page lookup.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let form_body_limit = DefaultBodyLimit::max(MAX_SUBMISSION_BYTES);

    Router::new()
        .route(
            "/api/contact",
            post(forms::contact_handler).layer(form_body_limit),
        )
        .route(
            "/api/feedback",
            post(forms::feedback_handler).layer(form_body_limit),
        )
        .route("/monitoring/health", get(health::health_handler))
        .route("/monitoring/health/ready", get(health::ready_handler))
        .route("/monitoring/health/live", get(health::live_handler))
        .route("/monitoring/metrics", get(health::metrics_handler))
        .route("/:locale", get(pages::locale_root_handler))
        .route("/:locale/", get(pages::locale_root_handler))
        .route("/:locale/*rest", get(pages::page_handler))
        .fallback(pages::not_found_handler)
        .layer(middleware::from_fn(locale_redirect))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
