//! Common test utilities and fixtures for integration tests.
//!
//! Every test gets a throwaway SQLite database in a temp directory, so the
//! suite runs self-contained: no external services, no shared state between
//! tests.

pub mod fixtures;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;
use uuid::Uuid;

use wordround_backend::build_router;
use wordround_backend::db::Database;
use wordround_backend::AppState;

/// Test context holding the database and router for one test.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
    // Keeps the database file alive for the duration of the test.
    _dir: TempDir,
}

impl TestContext {
    /// Create a fresh database with migrations applied and build the
    /// router against it.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("test.db");
        let database_url = format!("sqlite:{}", db_path.display());

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations().await.expect("Failed to run migrations");

        let db = Arc::new(db);
        let app = build_router(AppState { db: db.clone() });

        Self { db, app, _dir: dir }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Test server that sends no identity headers.
    pub fn anonymous_server(&self) -> TestServer {
        TestServer::new(self.router()).expect("failed to build test server")
    }

    /// Test server with a fixed anonymous session identity on every
    /// request.
    pub fn session_server(&self, session_id: &str) -> TestServer {
        let mut server = self.anonymous_server();
        server.add_header(
            HeaderName::from_static("x-session-id"),
            HeaderValue::from_str(session_id).expect("invalid session id"),
        );
        server
    }

    /// Test server with a fixed authenticated user identity on every
    /// request.
    pub fn user_server(&self, user_id: &str) -> TestServer {
        let mut server = self.anonymous_server();
        server.add_header(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_str(user_id).expect("invalid user id"),
        );
        server
    }
}

/// Extract an id field from a JSON response body.
pub fn id_from(body: &serde_json::Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("response has no id")
}

/// Create a dictionary and return its id.
pub async fn create_dictionary(server: &TestServer, name: &str) -> Uuid {
    let response = server
        .post("/api/dictionaries")
        .json(&fixtures::create_dictionary_request(name, None, None))
        .await;
    response.assert_status_ok();
    id_from(&response.json())
}

/// Add a word and return its id.
pub async fn add_word(server: &TestServer, dictionary_id: Uuid, text: &str) -> Uuid {
    let response = server
        .post("/api/words")
        .json(&fixtures::add_word_request(text, dictionary_id))
        .await;
    response.assert_status_ok();
    id_from(&response.json())
}

/// Record a free-practice attempt.
pub async fn record_attempt(server: &TestServer, word_id: Uuid, correct: bool, time_ms: i64) {
    let response = server
        .post("/api/attempts")
        .json(&fixtures::record_attempt_request(word_id, correct, time_ms))
        .await;
    response.assert_status_ok();
}

/// Record an attempt against a round.
pub async fn record_round_attempt(
    server: &TestServer,
    round_id: Uuid,
    word_id: Uuid,
    correct: bool,
    time_ms: i64,
) {
    let response = server
        .post(&format!("/api/rounds/{}/attempts", round_id))
        .json(&fixtures::record_round_attempt_request(
            word_id, correct, time_ms,
        ))
        .await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);
}

/// Fetch the round projection.
pub async fn get_round(server: &TestServer, round_id: Uuid) -> serde_json::Value {
    let response = server.get(&format!("/api/rounds/{}", round_id)).await;
    response.assert_status_ok();
    response.json()
}
