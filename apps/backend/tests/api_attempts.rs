//! Free-practice attempt API tests.

mod common;

use axum::http::StatusCode;

use common::fixtures;
use common::TestContext;

/// Recording an attempt returns its id and feeds word statistics.
#[tokio::test]
async fn test_record_attempt() {
    let ctx = TestContext::new().await;
    let server = ctx.session_server("session-a");
    let dictionary_id = common::create_dictionary(&server, "German").await;
    let word_id = common::add_word(&server, dictionary_id, "hallo").await;

    let response = server
        .post("/api/attempts")
        .json(&fixtures::record_attempt_request(word_id, true, 1200))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["id"].as_str().is_some());

    let response = server
        .get(&format!("/api/words?dictionary_id={}", dictionary_id))
        .await;
    let body: serde_json::Value = response.json();
    let stats = &body["words"][0]["stats"];
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["high_score_ms"], 1200);
}

/// Negative times are rejected.
#[tokio::test]
async fn test_record_attempt_negative_time() {
    let ctx = TestContext::new().await;
    let server = ctx.session_server("session-a");
    let dictionary_id = common::create_dictionary(&server, "German").await;
    let word_id = common::add_word(&server, dictionary_id, "hallo").await;

    let response = server
        .post("/api/attempts")
        .json(&fixtures::record_attempt_request(word_id, true, -5))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Attempts require a resolved identity.
#[tokio::test]
async fn test_record_attempt_requires_identity() {
    let ctx = TestContext::new().await;
    let server = ctx.anonymous_server();

    let response = server
        .post("/api/attempts")
        .json(&fixtures::record_attempt_request(
            uuid::Uuid::new_v4(),
            true,
            100,
        ))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

/// Authenticated users record attempts under their user identity.
#[tokio::test]
async fn test_record_attempt_as_user() {
    let ctx = TestContext::new().await;
    let server = ctx.user_server("user-1");
    let dictionary_id = common::create_dictionary(&server, "German").await;
    let word_id = common::add_word(&server, dictionary_id, "hallo").await;

    common::record_attempt(&server, word_id, false, 900).await;

    let response = server
        .get(&format!("/api/words?dictionary_id={}", dictionary_id))
        .await;
    let body: serde_json::Value = response.json();
    let stats = &body["words"][0]["stats"];
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["correct_rate"], 0.0);
    assert!(stats["high_score_ms"].is_null());
}
