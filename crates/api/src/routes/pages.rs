//! Page context endpoints.
//!
//! By the time a request gets here the locale middleware has guaranteed
//! the first segment looks like a locale prefix, but it may still be one
//! we have no content for.

use axum::{
    extract::{Path, State},
    http::Uri,
    Json,
};
use site_core::{Error, Locale, Page, PageContext};
use telemetry::metrics;
use tracing::debug;

use crate::response::ApiError;
use crate::state::AppState;

/// GET /:locale and /:locale/ - home page.
pub async fn locale_root_handler(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Result<Json<PageContext>, ApiError> {
    serve_page(&state, &locale, "")
}

/// GET /:locale/*rest
pub async fn page_handler(
    State(state): State<AppState>,
    Path((locale, rest)): Path<(String, String)>,
) -> Result<Json<PageContext>, ApiError> {
    serve_page(&state, &locale, &rest)
}

/// Anything no route matched.
pub async fn not_found_handler(uri: Uri) -> ApiError {
    metrics().pages_not_found.inc();
    ApiError::not_found(format!("no page at {}", uri.path()))
}

fn serve_page(state: &AppState, locale: &str, rest: &str) -> Result<Json<PageContext>, ApiError> {
    let context = locale.parse::<Locale>().and_then(|locale| {
        let page = Page::parse(rest).ok_or_else(|| Error::page_not_found(rest))?;
        state.content.page_context(locale, &page)
    });

    match context {
        Ok(context) => {
            metrics().pages_served.inc();
            Ok(Json(context))
        }
        Err(e) => {
            if e.is_not_found() {
                metrics().pages_not_found.inc();
                debug!(locale, page = rest, error = %e, "Page not found");
            }
            Err(e.into())
        }
    }
}
