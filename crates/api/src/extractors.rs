//! Request extractors.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use site_core::Locale;
use std::convert::Infallible;

/// Identifier used when a request carries no client address.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Rate-limit key for the requesting client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientId(client_id(&parts.headers)))
    }
}

/// Whole `X-Forwarded-For` value, else `X-Real-IP`, else [`UNKNOWN_CLIENT`].
///
/// The forwarded chain is used as-is, so `1.2.3.4, 10.0.0.1` and
/// `1.2.3.4, 10.0.0.2` are separate clients. Empty or non-UTF-8 header
/// values count as absent.
pub fn client_id(headers: &HeaderMap) -> String {
    header_str(headers, "x-forwarded-for")
        .filter(|v| !v.is_empty())
        .or_else(|| header_str(headers, "x-real-ip").filter(|v| !v.is_empty()))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Language for response messages, from `Accept-Language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

#[async_trait]
impl<S> FromRequestParts<S> for RequestLocale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = header_str(&parts.headers, header::ACCEPT_LANGUAGE.as_str())
            .and_then(Locale::from_accept_language)
            .unwrap_or_default();
        Ok(RequestLocale(locale))
    }
}
