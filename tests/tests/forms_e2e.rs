//! End-to-end tests for the form endpoints.
//!
//! These tests drive the real router:
//! POST /api/contact | /api/feedback → rate limiter → validation → MockMailer
//!
//! The limiter runs on a ManualClock, so window expiry is simulated by
//! advancing the clock instead of sleeping.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{
    fixtures::{self, TEST_CLIENT},
    setup::TestContext,
};
use serde_json::{json, Value};
use std::time::Duration;

fn server(ctx: &TestContext) -> TestServer {
    TestServer::new(ctx.router.clone()).expect("Failed to create test server")
}

async fn post_contact(server: &TestServer, client: &str, payload: &Value) -> axum_test::TestResponse {
    server
        .post("/api/contact")
        .add_header("x-forwarded-for", client)
        .json(payload)
        .await
}

async fn post_feedback(server: &TestServer, client: &str, payload: &Value) -> axum_test::TestResponse {
    server
        .post("/api/feedback")
        .add_header("x-forwarded-for", client)
        .json(payload)
        .await
}

/// 5 accepted, 6th throttled, accepted again once the window has passed.
#[tokio::test]
async fn test_contact_rate_limit_window_e2e() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    let payload = fixtures::contact_payload();

    for i in 1..=5 {
        let response = post_contact(&server, TEST_CLIENT, &payload).await;
        assert_eq!(
            response.status_code(),
            StatusCode::OK,
            "Submission {} should be accepted",
            i
        );
        let body: Value = response.json();
        assert_eq!(body["message"], "Mesajınız başarıyla gönderildi ✅");
    }
    assert_eq!(ctx.captured_mail_count(), 5);

    let response = post_contact(&server, TEST_CLIENT, &payload).await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Çok fazla istek gönderdiniz. Lütfen 15 dakika sonra tekrar deneyin."
    );
    assert_eq!(ctx.captured_mail_count(), 5, "Throttled request must not send mail");

    ctx.advance(Duration::from_secs(15 * 60 + 1));

    let response = post_contact(&server, TEST_CLIENT, &payload).await;
    response.assert_status_ok();
    assert_eq!(ctx.captured_mail_count(), 6);
}

/// 429 carries a Retry-After header with the seconds left in the window.
#[tokio::test]
async fn test_rate_limited_response_has_retry_after() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    let payload = fixtures::contact_payload();

    for _ in 0..5 {
        post_contact(&server, TEST_CLIENT, &payload)
            .await
            .assert_status_ok();
    }

    ctx.advance(Duration::from_secs(60));

    let response = post_contact(&server, TEST_CLIENT, &payload).await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let retry_after = response.header("retry-after");
    assert_eq!(retry_after.to_str().unwrap(), "840");
}

/// Clients are counted separately.
#[tokio::test]
async fn test_clients_do_not_interfere() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    let payload = fixtures::contact_payload();

    for _ in 0..5 {
        post_contact(&server, TEST_CLIENT, &payload)
            .await
            .assert_status_ok();
    }
    post_contact(&server, TEST_CLIENT, &payload)
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    post_contact(&server, "5.6.7.8", &payload)
        .await
        .assert_status_ok();
}

/// The contact and feedback forms have separate quotas.
#[tokio::test]
async fn test_form_limiters_are_independent() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    let contact = fixtures::contact_payload();

    for _ in 0..5 {
        post_contact(&server, TEST_CLIENT, &contact)
            .await
            .assert_status_ok();
    }
    post_contact(&server, TEST_CLIENT, &contact)
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    post_feedback(&server, TEST_CLIENT, &fixtures::feedback_payload("complaint"))
        .await
        .assert_status_ok();
}

/// Requests without any forwarding header share the "unknown" bucket.
#[tokio::test]
async fn test_requests_without_client_headers_share_bucket() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    let payload = fixtures::contact_payload();

    for _ in 0..5 {
        server
            .post("/api/contact")
            .json(&payload)
            .await
            .assert_status_ok();
    }
    server
        .post("/api/contact")
        .add_header("x-real-ip", "unknown")
        .json(&payload)
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

/// A one-character name is rejected and nothing is mailed.
#[tokio::test]
async fn test_contact_short_name_rejected() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    let payload = fixtures::with_field(fixtures::contact_payload(), "name", json!("A"));

    let response = post_contact(&server, TEST_CLIENT, &payload).await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Form verilerinde hata var. Lütfen kontrol ediniz."
    );
    assert_eq!(ctx.captured_mail_count(), 0);
}

/// Each rule violation is a 400.
#[tokio::test]
async fn test_contact_field_rules() {
    let ctx = TestContext::with_rate_limit(api::middleware::RateLimitConfig {
        max_requests: 100,
        ..Default::default()
    });
    let server = server(&ctx);
    let base = fixtures::contact_payload();

    let invalid = [
        fixtures::with_field(base.clone(), "email", json!("not-an-email")),
        fixtures::with_field(base.clone(), "phone", json!("123456789")),
        fixtures::with_field(base.clone(), "message", json!("kısa")),
        fixtures::with_field(base.clone(), "name", json!(42)),
        fixtures::without_field(base.clone(), "phone"),
        json!([]),
    ];

    for payload in &invalid {
        let response = post_contact(&server, TEST_CLIENT, payload).await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "Payload should be rejected: {}",
            payload
        );
    }
    assert_eq!(ctx.captured_mail_count(), 0);
}

/// Boundary lengths are accepted.
#[tokio::test]
async fn test_contact_minimum_lengths_accepted() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    let payload = json!({
        "name": "Al",
        "email": "al@example.com",
        "phone": "0532123456",
        "message": "Merhabalar"
    });

    post_contact(&server, TEST_CLIENT, &payload)
        .await
        .assert_status_ok();
    assert_eq!(ctx.captured_mail_count(), 1);
}

/// Malformed JSON is a client error, and still counts against the quota.
#[tokio::test]
async fn test_malformed_json_rejected_and_counted() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    for _ in 0..5 {
        server
            .post("/api/contact")
            .add_header("x-forwarded-for", TEST_CLIENT)
            .content_type("application/json")
            .bytes("{\"name\": ".into())
            .await
            .assert_status_bad_request();
    }

    post_contact(&server, TEST_CLIENT, &fixtures::contact_payload())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

/// The relayed mail carries the submitter and the labelled fields.
#[tokio::test]
async fn test_contact_mail_content() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    post_contact(&server, TEST_CLIENT, &fixtures::contact_payload())
        .await
        .assert_status_ok();

    let mail = ctx.captured_mail();
    assert_eq!(mail.len(), 1);
    let mail = &mail[0];
    assert_eq!(mail.subject, "Yeni İletişim Formu Mesajı");
    assert_eq!(mail.sender_name, "Ayşe Yılmaz");
    assert_eq!(mail.reply_to, "ayse@example.com");
    assert!(mail.body.contains("Ad Soyad: Ayşe Yılmaz"));
    assert!(mail.body.contains("E-posta: ayse@example.com"));
    assert!(mail.body.contains("Telefon: 05321234567"));
    assert!(mail
        .body
        .contains("Hafta sonu için iki kişilik oda ayırtmak istiyoruz."));
}

/// Transport failure is a 500 with the fixed text; the cause is not echoed.
#[tokio::test]
async fn test_mail_failure_returns_generic_error() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    ctx.set_mailer_failure(true);

    let response = post_contact(&server, TEST_CLIENT, &fixtures::contact_payload()).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"], "Mesaj gönderilirken bir hata oluştu ❌");
    let raw = response.text();
    assert!(!raw.contains("535"), "Transport detail leaked: {}", raw);
    assert!(!raw.contains("Password"), "Transport detail leaked: {}", raw);

    let response = post_feedback(&server, TEST_CLIENT, &fixtures::feedback_payload("suggestion")).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Geri bildirim gönderilirken bir hata oluştu ❌");
}

/// Complaint and suggestion mails are labelled differently.
#[tokio::test]
async fn test_feedback_category_in_subject() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = post_feedback(&server, TEST_CLIENT, &fixtures::feedback_payload("complaint")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Geri bildiriminiz başarıyla gönderildi ✅");

    post_feedback(&server, TEST_CLIENT, &fixtures::feedback_payload("suggestion"))
        .await
        .assert_status_ok();

    let mail = ctx.captured_mail();
    assert_eq!(mail.len(), 2);
    assert!(mail[0].subject.contains("Şikayet"));
    assert!(mail[0].body.contains("Kategori: Şikayet"));
    assert!(mail[1].subject.contains("Öneri"));
    assert!(!mail[1].subject.contains("Şikayet"));
}

/// Missing or unknown category is a 400.
#[tokio::test]
async fn test_feedback_category_required() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let missing = fixtures::without_field(fixtures::feedback_payload("complaint"), "category");
    post_feedback(&server, TEST_CLIENT, &missing)
        .await
        .assert_status_bad_request();

    post_feedback(&server, TEST_CLIENT, &fixtures::feedback_payload("praise"))
        .await
        .assert_status_bad_request();

    post_feedback(&server, TEST_CLIENT, &fixtures::feedback_payload("Complaint"))
        .await
        .assert_status_bad_request();

    assert_eq!(ctx.captured_mail_count(), 0);
}

/// Accept-Language selects the response language.
#[tokio::test]
async fn test_messages_follow_accept_language() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .post("/api/contact")
        .add_header("x-forwarded-for", TEST_CLIENT)
        .add_header("accept-language", "en-US,en;q=0.9")
        .json(&fixtures::contact_payload())
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Your message has been sent successfully ✅");

    let response = server
        .post("/api/contact")
        .add_header("x-forwarded-for", TEST_CLIENT)
        .add_header("accept-language", "ar")
        .json(&fixtures::with_field(fixtures::contact_payload(), "name", json!("A")))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "توجد أخطاء في بيانات النموذج. يرجى التحقق منها.");
}

/// Form endpoints only accept POST.
#[tokio::test]
async fn test_form_endpoints_reject_get() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server.get("/api/contact").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

/// An e-mail that cannot be used as a mail header is a 400, not a relay failure.
#[tokio::test]
async fn test_email_with_doubled_dot_rejected() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    for bad in ["a..b@example.com", ".a@example.com", "a.@example.com"] {
        let payload = fixtures::with_field(fixtures::contact_payload(), "email", json!(bad));
        let response = post_contact(&server, TEST_CLIENT, &payload).await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(
            body["error"],
            "Form verilerinde hata var. Lütfen kontrol ediniz."
        );
    }
    assert_eq!(ctx.captured_mail_count(), 0);
}

/// Oversized bodies get the JSON validation error and still use quota.
#[tokio::test]
async fn test_oversized_body_rejected_and_counted() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    let payload = fixtures::with_field(
        fixtures::contact_payload(),
        "message",
        json!("a".repeat(70 * 1024)),
    );

    for _ in 0..5 {
        let response = post_contact(&server, TEST_CLIENT, &payload).await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(
            body["error"],
            "Form verilerinde hata var. Lütfen kontrol ediniz."
        );
    }

    post_contact(&server, TEST_CLIENT, &fixtures::contact_payload())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(ctx.captured_mail_count(), 0);
}

/// The whole forwarded chain is the client key.
#[tokio::test]
async fn test_forwarded_chains_counted_separately() {
    let ctx = TestContext::new();
    let server = server(&ctx);
    let payload = fixtures::contact_payload();

    for _ in 0..5 {
        post_contact(&server, "1.2.3.4, 10.0.0.1", &payload)
            .await
            .assert_status_ok();
    }
    post_contact(&server, "1.2.3.4, 10.0.0.1", &payload)
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    post_contact(&server, "1.2.3.4, 10.0.0.2", &payload)
        .await
        .assert_status_ok();
}
