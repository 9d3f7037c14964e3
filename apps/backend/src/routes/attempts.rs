//! Free-practice attempt endpoint

use axum::{extract::State, Extension, Json};
use practice_core::ValidationError;

use crate::error::Result;
use crate::models::{AttemptIdResponse, RecordAttemptRequest};
use crate::routes::auth::Identity;
use crate::AppState;

/// POST /api/attempts
///
/// Appends one attempt row to the caller's practice history. The word id is
/// taken as given; round progress is fed through the round endpoints
/// instead.
pub async fn record(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<RecordAttemptRequest>,
) -> Result<Json<AttemptIdResponse>> {
    if payload.time_ms < 0 {
        return Err(ValidationError::NegativeTime(payload.time_ms).into());
    }

    let attempt = state
        .db
        .record_attempt(&identity.0, payload.word_id, payload.correct, payload.time_ms)
        .await?;

    Ok(Json(AttemptIdResponse { id: attempt.id }))
}
