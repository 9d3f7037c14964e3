//! Word endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::Identity;
use crate::AppState;

/// POST /api/words
pub async fn add(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<AddWordRequest>,
) -> Result<Json<WordIdResponse>> {
    let text = practice_core::normalize_word(&payload.text)?;

    let dictionary = state
        .db
        .get_active_dictionary(&identity.0, payload.dictionary_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Dictionary not found".to_string()))?;

    if state
        .db
        .find_active_word(dictionary.id, &text)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "Word already exists in this dictionary".to_string(),
        ));
    }

    let word = state
        .db
        .create_word(
            &identity.0,
            dictionary.id,
            &text,
            payload.tags.unwrap_or_default(),
            payload.grade_level.as_deref(),
        )
        .await?;

    Ok(Json(WordIdResponse { id: word.id }))
}

/// GET /api/words?dictionary_id=...
///
/// Words of one dictionary with statistics computed from attempt history,
/// sorted by text. Attempts at or before a word's reset cutoff are hidden.
pub async fn list_with_stats(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<WordListQuery>,
) -> Result<Json<WordListResponse>> {
    let dictionary = state
        .db
        .get_active_dictionary(&identity.0, query.dictionary_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Dictionary not found".to_string()))?;

    let words = state.db.list_active_words(dictionary.id).await?;

    let mut result = Vec::with_capacity(words.len());
    for word in words {
        let samples = state.db.attempt_samples(word.id).await?;
        let stats = practice_core::compute_stats(&samples, word.reset_at);
        result.push(WordWithStats { word, stats });
    }

    Ok(Json(WordListResponse { words: result }))
}

/// POST /api/words/reset-stats
///
/// Three mutually exclusive modes: one word, one dictionary, or every word
/// the caller owns.
pub async fn reset_stats(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ResetStatsRequest>,
) -> Result<StatusCode> {
    let now = Utc::now();

    match (payload.word_id, payload.dictionary_id) {
        (Some(_), Some(_)) => {
            return Err(ApiError::Validation(
                "Provide either a word id or a dictionary id, not both".to_string(),
            ));
        }
        (Some(word_id), None) => {
            let word = state
                .db
                .get_active_word(&identity.0, word_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Word not found".to_string()))?;
            state.db.reset_word_stats(word.id, now).await?;
        }
        (None, Some(dictionary_id)) => {
            let dictionary = state
                .db
                .get_active_dictionary(&identity.0, dictionary_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Dictionary not found".to_string()))?;
            state.db.reset_dictionary_stats(dictionary.id, now).await?;
        }
        (None, None) => {
            state.db.reset_all_stats(&identity.0, now).await?;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/words/:id
pub async fn delete_word(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteWordResponse>> {
    let word = state
        .db
        .get_active_word(&identity.0, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Word not found".to_string()))?;

    state.db.delete_word(word.id).await?;

    Ok(Json(DeleteWordResponse { success: true }))
}
