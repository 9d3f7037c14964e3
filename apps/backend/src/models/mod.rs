//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use practice_core::{RoundPolicy, WordStats};

// === Database Entity Types ===

/// Named, user-owned word collection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dictionary {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Practice word. `text` is stored normalized (trimmed, lowercased) and is
/// unique among the dictionary's active words.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Word {
    pub id: Uuid,
    /// Nullable only for legacy rows predating dictionaries; the service
    /// always writes it.
    pub dictionary_id: Option<Uuid>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
    pub tags: Json<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    /// Soft-reset cutoff: attempts created at or before this are hidden
    /// from statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// One practice repetition. Append-only; round-bound attempts also carry
/// the round id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attempt {
    pub id: Uuid,
    pub word_id: Uuid,
    pub correct: bool,
    pub time_ms: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Bounded practice session over a fixed set of words.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Round {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// "active" | "done" (see `practice_core::RoundStatus`).
    pub status: String,
    pub reps_per_word: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Round {
    /// Goal policy fixed when the round was started.
    pub fn policy(&self) -> RoundPolicy {
        RoundPolicy {
            reps_per_word: self.reps_per_word,
            max_time_ms: self.max_time_ms,
        }
    }
}

/// Per-word progress record within a round.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoundItem {
    pub id: Uuid,
    pub round_id: Uuid,
    pub word_id: Uuid,
    pub reps_done: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_time_ms: Option<i64>,
    pub solved: bool,
}

// === Dictionary API Types ===

#[derive(Debug, Deserialize)]
pub struct CreateDictionaryRequest {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDictionaryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DictionaryIdResponse {
    pub id: Uuid,
}

/// Dictionary plus its live word count, as listed to clients.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DictionaryWithCount {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub dictionary: Dictionary,
    pub word_count: i64,
}

#[derive(Debug, Serialize)]
pub struct DictionaryListResponse {
    pub dictionaries: Vec<DictionaryWithCount>,
}

// === Word API Types ===

#[derive(Debug, Deserialize)]
pub struct AddWordRequest {
    pub text: String,
    pub dictionary_id: Uuid,
    pub tags: Option<Vec<String>>,
    pub grade_level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WordIdResponse {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct WordListQuery {
    pub dictionary_id: Uuid,
}

/// Word plus statistics derived from its attempt history.
#[derive(Debug, Serialize)]
pub struct WordWithStats {
    #[serde(flatten)]
    pub word: Word,
    pub stats: WordStats,
}

#[derive(Debug, Serialize)]
pub struct WordListResponse {
    pub words: Vec<WordWithStats>,
}

/// Reset-stats target: one word, one dictionary, or (neither) every owned
/// word. The two ids are mutually exclusive.
#[derive(Debug, Deserialize)]
pub struct ResetStatsRequest {
    pub word_id: Option<Uuid>,
    pub dictionary_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct DeleteWordResponse {
    pub success: bool,
}

// === Attempt API Types ===

#[derive(Debug, Deserialize)]
pub struct RecordAttemptRequest {
    pub word_id: Uuid,
    pub correct: bool,
    pub time_ms: i64,
}

#[derive(Debug, Serialize)]
pub struct AttemptIdResponse {
    pub id: Uuid,
}

// === Round API Types ===

#[derive(Debug, Deserialize)]
pub struct StartRoundRequest {
    pub word_ids: Vec<Uuid>,
    pub reps_per_word: i64,
    pub max_time_ms: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RoundIdResponse {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RecordRoundAttemptRequest {
    pub word_id: Uuid,
    pub time_ms: i64,
    pub correct: bool,
}

/// Round projection for the practice HUD: the round, its items, and solved
/// counts.
#[derive(Debug, Serialize)]
pub struct RoundStateResponse {
    pub round: Round,
    pub items: Vec<RoundItem>,
    pub solved: i64,
    pub total: i64,
}
