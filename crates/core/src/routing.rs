//! Locale routing decision.
//!
//! Every page path must begin with exactly one supported locale segment.
//! Paths without one are redirected to the default locale; static assets
//! and reserved prefixes are left alone.

use crate::locale::Locale;

/// Prefixes the router never touches.
pub const RESERVED_PREFIXES: [&str; 3] = ["/_next", "/api", "/monitoring"];

/// Outcome of routing a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Static asset or reserved prefix; pass through untouched.
    Excluded,
    /// Path already carries a supported locale.
    Localized(Locale),
    /// Path lacks a locale; redirect to this target.
    Redirect(String),
}

impl RouteDecision {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect(target) => Some(target),
            _ => None,
        }
    }
}

/// Decide how a request path is routed.
pub fn route(path: &str) -> RouteDecision {
    if is_excluded(path) {
        return RouteDecision::Excluded;
    }

    match locale_prefix(path) {
        Some(locale) => RouteDecision::Localized(locale),
        None => RouteDecision::Redirect(localized_path(Locale::DEFAULT, path)),
    }
}

/// Static assets (any dot) and reserved prefixes.
pub fn is_excluded(path: &str) -> bool {
    path.contains('.') || RESERVED_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Locale whose prefix the path carries: exactly `/<locale>` or `/<locale>/...`.
pub fn locale_prefix(path: &str) -> Option<Locale> {
    Locale::ALL.into_iter().find(|locale| {
        let rest = path
            .strip_prefix('/')
            .and_then(|p| p.strip_prefix(locale.as_str()));
        matches!(rest, Some(r) if r.is_empty() || r.starts_with('/'))
    })
}

/// Insert a locale segment right after the leading slash.
pub fn localized_path(locale: Locale, path: &str) -> String {
    if path.starts_with('/') {
        format!("/{}{}", locale, path)
    } else {
        format!("/{}/{}", locale, path)
    }
}
