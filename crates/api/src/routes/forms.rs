//! Contact and feedback form endpoints.
//!
//! Both endpoints run the same pipeline: per-form rate limit check,
//! payload validation, then a synchronous mail relay. Clients only ever
//! see the fixed localized texts; causes are logged.
//!
//! Bodies are capped by a `DefaultBodyLimit` layer on the form routes. The
//! rejection is taken as a value so oversized requests still count against
//! the limiter and get the usual JSON error.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use site_core::{
    messages, parse_submission, ContactSubmission, Error, FeedbackSubmission, Locale,
    OutgoingMail, Submission,
};
use std::time::Instant;
use telemetry::{health, metrics};
use tracing::{debug, error, info, warn};

use crate::extractors::{ClientId, RequestLocale};
use crate::middleware::RateDecision;
use crate::response::{ApiError, MessageResponse};
use crate::state::AppState;

/// POST /api/contact
pub async fn contact_handler(
    State(state): State<AppState>,
    ClientId(client): ClientId,
    RequestLocale(locale): RequestLocale,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    metrics().contact_submissions.inc();
    submit::<ContactSubmission>(&state, &client, locale, body).await
}

/// POST /api/feedback
pub async fn feedback_handler(
    State(state): State<AppState>,
    ClientId(client): ClientId,
    RequestLocale(locale): RequestLocale,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    metrics().feedback_submissions.inc();
    submit::<FeedbackSubmission>(&state, &client, locale, body).await
}

async fn submit<S: Submission>(
    state: &AppState,
    client: &str,
    locale: Locale,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let texts = messages(locale);
    let form = S::KIND.as_str();
    let limiter = state.limiter(S::KIND);

    match limiter.decide(client) {
        RateDecision::Allowed { count } => {
            debug!(form, client, count, "Submission admitted");
        }
        limited @ RateDecision::Limited { .. } => {
            metrics().rate_limited_requests.inc();
            warn!(form, client, "Submission rate limited");
            return Err(ApiError::rate_limited(
                texts.throttled(limiter.config().window_secs),
                limited.retry_after_secs(),
            ));
        }
    }

    let invalid = |e: &dyn std::fmt::Display| {
        metrics().validation_failures.inc();
        warn!(form, client, error = %e, "Submission failed validation");
        ApiError::bad_request(texts.invalid_form)
    };

    let body = body.map_err(|e| invalid(&e))?;
    let submission: S = parse_submission(&body).map_err(|e| invalid(&e))?;

    match relay(state, &submission.to_mail()).await {
        Ok(()) => {}
        Err(e @ Error::InvalidMail(_)) => return Err(invalid(&e)),
        Err(e) => {
            error!(form, client, error = %e, "Form mail delivery failed");
            return Err(ApiError::internal(texts.failed(S::KIND)));
        }
    }

    info!(form, client, "Submission relayed");
    Ok(Json(MessageResponse::new(texts.sent(S::KIND))))
}

/// Hand a message to the mailer and record the outcome.
async fn relay(state: &AppState, mail: &OutgoingMail) -> site_core::Result<()> {
    let start = Instant::now();
    let result = state.mailer.send(mail).await;
    metrics()
        .mail_latency_ms
        .observe(start.elapsed().as_millis() as u64);

    match &result {
        Ok(()) => {
            metrics().mails_sent.inc();
            health().mailer.set_healthy();
        }
        // Never reached the transport
        Err(Error::InvalidMail(_)) => {}
        Err(e) => {
            metrics().mail_errors.inc();
            health().mailer.set_unhealthy(e.to_string());
        }
    }
    result
}
