//! Attempt statistics.
//!
//! Statistics are computed at query time from a word's full attempt history.
//! A soft reset hides history by timestamp instead of deleting rows, so the
//! cutoff is applied here rather than in the store.

use chrono::{DateTime, Utc};

use crate::types::WordStats;

/// One practice attempt as the statistics code sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttemptSample {
    pub correct: bool,
    pub time_ms: i64,
    pub created_at: DateTime<Utc>,
}

/// Median attempt time.
///
/// Even-length lists average the middle pair, rounded half-up.
pub fn median(times: &[i64]) -> Option<i64> {
    if times.is_empty() {
        return None;
    }
    let mut sorted = times.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(((sorted[mid - 1] + sorted[mid]) as f64 / 2.0).round() as i64)
    } else {
        Some(sorted[mid])
    }
}

/// Aggregate statistics over a word's attempt history.
///
/// Attempts created at or before `reset_cutoff` are excluded. The typical
/// time covers all kept attempts; the high score is the fastest *correct*
/// one.
pub fn compute_stats(samples: &[AttemptSample], reset_cutoff: Option<DateTime<Utc>>) -> WordStats {
    let kept: Vec<&AttemptSample> = samples
        .iter()
        .filter(|s| match reset_cutoff {
            Some(cutoff) => s.created_at > cutoff,
            None => true,
        })
        .collect();

    let total = kept.len() as i64;
    let correct_count = kept.iter().filter(|s| s.correct).count() as i64;
    let correct_rate = if total == 0 {
        None
    } else {
        Some(correct_count as f64 / total as f64)
    };

    let times: Vec<i64> = kept.iter().map(|s| s.time_ms).collect();
    let typical_time_ms = median(&times);

    let high_score_ms = kept.iter().filter(|s| s.correct).map(|s| s.time_ms).min();

    WordStats {
        total,
        correct_rate,
        typical_time_ms,
        high_score_ms,
    }
}
