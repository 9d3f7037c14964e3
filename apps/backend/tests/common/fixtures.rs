//! Request-body builders for integration tests.

use serde_json::json;
use uuid::Uuid;

/// Create a dictionary request body.
pub fn create_dictionary_request(
    name: &str,
    description: Option<&str>,
    color: Option<&str>,
) -> serde_json::Value {
    json!({
        "name": name,
        "description": description,
        "color": color,
    })
}

/// Update a dictionary request body; absent fields are left unchanged.
pub fn update_dictionary_request(
    name: Option<&str>,
    description: Option<&str>,
    color: Option<&str>,
) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    if let Some(n) = name {
        obj.insert("name".to_string(), json!(n));
    }
    if let Some(d) = description {
        obj.insert("description".to_string(), json!(d));
    }
    if let Some(c) = color {
        obj.insert("color".to_string(), json!(c));
    }
    serde_json::Value::Object(obj)
}

/// Add a word request body.
pub fn add_word_request(text: &str, dictionary_id: Uuid) -> serde_json::Value {
    json!({
        "text": text,
        "dictionary_id": dictionary_id,
    })
}

/// Add a word request body with tags and grade level.
pub fn add_word_request_full(
    text: &str,
    dictionary_id: Uuid,
    tags: &[&str],
    grade_level: Option<&str>,
) -> serde_json::Value {
    json!({
        "text": text,
        "dictionary_id": dictionary_id,
        "tags": tags,
        "grade_level": grade_level,
    })
}

/// Record a free-practice attempt request body.
pub fn record_attempt_request(word_id: Uuid, correct: bool, time_ms: i64) -> serde_json::Value {
    json!({
        "word_id": word_id,
        "correct": correct,
        "time_ms": time_ms,
    })
}

/// Start a round request body.
pub fn start_round_request(
    word_ids: &[Uuid],
    reps_per_word: i64,
    max_time_ms: Option<i64>,
) -> serde_json::Value {
    json!({
        "word_ids": word_ids,
        "reps_per_word": reps_per_word,
        "max_time_ms": max_time_ms,
    })
}

/// Record a round attempt request body.
pub fn record_round_attempt_request(
    word_id: Uuid,
    correct: bool,
    time_ms: i64,
) -> serde_json::Value {
    json!({
        "word_id": word_id,
        "correct": correct,
        "time_ms": time_ms,
    })
}

/// Reset-stats request body targeting one word.
pub fn reset_word_stats_request(word_id: Uuid) -> serde_json::Value {
    json!({ "word_id": word_id })
}

/// Reset-stats request body targeting one dictionary.
pub fn reset_dictionary_stats_request(dictionary_id: Uuid) -> serde_json::Value {
    json!({ "dictionary_id": dictionary_id })
}

/// Reset-stats request body targeting everything the caller owns.
pub fn reset_all_stats_request() -> serde_json::Value {
    json!({})
}
