//! Dictionary endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::Identity;
use crate::AppState;

/// POST /api/dictionaries
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateDictionaryRequest>,
) -> Result<Json<DictionaryIdResponse>> {
    let name = practice_core::normalize_dictionary_name(&payload.name)?;

    if state
        .db
        .find_active_dictionary_by_name(&identity.0, &name)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "Dictionary with this name already exists".to_string(),
        ));
    }

    let dictionary = state
        .db
        .create_dictionary(
            &identity.0,
            &name,
            payload.description.as_deref(),
            payload.color.as_deref(),
        )
        .await?;

    tracing::info!("Created dictionary {}", dictionary.id);

    Ok(Json(DictionaryIdResponse { id: dictionary.id }))
}

/// GET /api/dictionaries
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<DictionaryListResponse>> {
    let dictionaries = state.db.list_dictionaries_with_counts(&identity.0).await?;
    Ok(Json(DictionaryListResponse { dictionaries }))
}

/// GET /api/dictionaries/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<DictionaryWithCount>> {
    let dictionary = state
        .db
        .get_active_dictionary(&identity.0, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Dictionary not found".to_string()))?;

    let word_count = state.db.count_active_words(dictionary.id).await?;

    Ok(Json(DictionaryWithCount {
        dictionary,
        word_count,
    }))
}

/// PUT /api/dictionaries/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDictionaryRequest>,
) -> Result<Json<DictionaryIdResponse>> {
    let dictionary = state
        .db
        .get_active_dictionary(&identity.0, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Dictionary not found".to_string()))?;

    let name = match payload.name {
        Some(raw) => {
            let name = practice_core::normalize_dictionary_name(&raw)?;
            if let Some(existing) = state
                .db
                .find_active_dictionary_by_name(&identity.0, &name)
                .await?
            {
                if existing.id != dictionary.id {
                    return Err(ApiError::Conflict(
                        "Dictionary with this name already exists".to_string(),
                    ));
                }
            }
            Some(name)
        }
        None => None,
    };

    state
        .db
        .update_dictionary(
            dictionary.id,
            name.as_deref(),
            payload.description.as_deref(),
            payload.color.as_deref(),
        )
        .await?;

    Ok(Json(DictionaryIdResponse { id: dictionary.id }))
}

/// DELETE /api/dictionaries/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<DictionaryIdResponse>> {
    let dictionary = state
        .db
        .get_active_dictionary(&identity.0, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Dictionary not found".to_string()))?;

    let live_words = state.db.count_active_words(dictionary.id).await?;
    if live_words > 0 {
        return Err(ApiError::Conflict(
            "Cannot delete a dictionary that still contains words".to_string(),
        ));
    }

    if state.db.count_active_dictionaries(&identity.0).await? <= 1 {
        return Err(ApiError::Conflict(
            "Cannot delete the only remaining dictionary".to_string(),
        ));
    }

    state.db.deactivate_dictionary(dictionary.id).await?;

    tracing::info!("Removed dictionary {}", dictionary.id);

    Ok(Json(DictionaryIdResponse { id: dictionary.id }))
}
