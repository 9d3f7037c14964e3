//! Round endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use practice_core::ValidationError;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::Identity;
use crate::AppState;

/// POST /api/rounds
pub async fn start(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<StartRoundRequest>,
) -> Result<Json<RoundIdResponse>> {
    if payload.reps_per_word < 1 {
        return Err(ValidationError::InvalidReps(payload.reps_per_word).into());
    }
    if let Some(cap) = payload.max_time_ms {
        if cap < 0 {
            return Err(ValidationError::NegativeTime(cap).into());
        }
    }

    let round_id = state
        .db
        .start_round(
            &identity.0,
            &payload.word_ids,
            payload.reps_per_word,
            payload.max_time_ms,
        )
        .await?;

    tracing::info!(
        "Started round {} over {} words",
        round_id,
        payload.word_ids.len()
    );

    Ok(Json(RoundIdResponse { id: round_id }))
}

/// POST /api/rounds/:id/attempts
pub async fn record(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(round_id): Path<Uuid>,
    Json(payload): Json<RecordRoundAttemptRequest>,
) -> Result<StatusCode> {
    if payload.time_ms < 0 {
        return Err(ValidationError::NegativeTime(payload.time_ms).into());
    }

    state
        .db
        .record_round_attempt(
            &identity.0,
            round_id,
            payload.word_id,
            payload.time_ms,
            payload.correct,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/rounds/:id
///
/// Round projection for the practice HUD, or JSON `null` when the round
/// does not exist for this caller.
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(round_id): Path<Uuid>,
) -> Result<Json<Option<RoundStateResponse>>> {
    let state_projection = state.db.get_round_state(&identity.0, round_id).await?;
    Ok(Json(state_projection))
}
