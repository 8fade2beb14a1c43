//! Locale redirect middleware.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use site_core::{route, RouteDecision};
use telemetry::metrics;
use tracing::debug;

/// Redirect page requests without a locale prefix to the default locale.
///
/// Static assets and reserved prefixes pass through untouched, as do paths
/// that already carry a supported locale.
pub async fn locale_redirect(request: Request, next: Next) -> Response {
    match route(request.uri().path()) {
        RouteDecision::Redirect(target) => {
            metrics().locale_redirects.inc();
            debug!(from = %request.uri().path(), to = %target, "Redirecting to default locale");
            Redirect::temporary(&target).into_response()
        }
        RouteDecision::Localized(_) | RouteDecision::Excluded => next.run(request).await,
    }
}
