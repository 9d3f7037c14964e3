//! Core types for the practice domain.

use serde::{Deserialize, Serialize};

/// Identity that owns a dictionary, word, or round.
///
/// Every entity is scoped to exactly one of these: an authenticated user id
/// or an anonymous device session id. Store predicates dispatch on the
/// variant rather than juggling a pair of maybe-set fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum OwnerKey {
    User(String),
    Session(String),
}

impl OwnerKey {
    /// Owner as a `(user_id, session_id)` column pair for store predicates.
    /// Exactly one side is set.
    pub fn as_columns(&self) -> (Option<&str>, Option<&str>) {
        match self {
            Self::User(id) => (Some(id), None),
            Self::Session(id) => (None, Some(id)),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }
}

/// Round lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    Active,
    Done,
}

impl RoundStatus {
    /// Stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Done => "done",
        }
    }

    /// Parse the stored representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Aggregated attempt statistics for one word.
///
/// `None` fields mean "no data yet": a word with no attempts on record has
/// no accuracy, no typical time, and no high score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStats {
    pub total: i64,
    pub correct_rate: Option<f64>,
    pub typical_time_ms: Option<i64>,
    pub high_score_ms: Option<i64>,
}
