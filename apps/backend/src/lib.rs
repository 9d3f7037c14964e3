//! wordround backend: HTTP service for the spaced-practice word trainer.

pub mod admin;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

/// Build the API router. Everything under /api requires a resolved
/// identity; /health does not.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Dictionary routes
        .route(
            "/api/dictionaries",
            post(routes::dictionaries::create).get(routes::dictionaries::list),
        )
        .route(
            "/api/dictionaries/{id}",
            get(routes::dictionaries::get)
                .put(routes::dictionaries::update)
                .delete(routes::dictionaries::remove),
        )
        // Word routes
        .route(
            "/api/words",
            post(routes::words::add).get(routes::words::list_with_stats),
        )
        .route("/api/words/reset-stats", post(routes::words::reset_stats))
        .route("/api/words/{id}", delete(routes::words::delete_word))
        // Attempt routes
        .route("/api/attempts", post(routes::attempts::record))
        // Round routes
        .route("/api/rounds", post(routes::rounds::start))
        .route("/api/rounds/{id}", get(routes::rounds::get))
        .route("/api/rounds/{id}/attempts", post(routes::rounds::record))
        .layer(middleware::from_fn(routes::auth::identity_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:wordround.db".to_string());

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let db = Arc::new(db);

    // One-shot administrative mode; the HTTP surface never exposes this.
    if std::env::args().any(|arg| arg == "backfill-legacy") {
        admin::backfill_legacy(&db).await?;
        return Ok(());
    }

    let state = AppState { db };

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
