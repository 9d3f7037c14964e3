//! Round goal math.
//!
//! A round fixes a repetition target and an optional time cap when it is
//! created. Per-item progress is folded in one attempt at a time: correct
//! attempts advance the rep count, every attempt (correct or not) feeds the
//! best observed time, and an item counts as solved once both goals hold.

use serde::{Deserialize, Serialize};

/// Goal policy fixed at round creation, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPolicy {
    pub reps_per_word: i64,
    pub max_time_ms: Option<i64>,
}

impl RoundPolicy {
    /// Whether the given progress satisfies this policy.
    ///
    /// Requires the repetition goal and, when a time cap is set, a recorded
    /// best time within the cap. `reps_done` only grows and `best_time_ms`
    /// only shrinks, so re-deriving this after every attempt can never
    /// un-solve an item.
    pub fn satisfied_by(&self, reps_done: i64, best_time_ms: Option<i64>) -> bool {
        if reps_done < self.reps_per_word {
            return false;
        }
        match self.max_time_ms {
            None => true,
            Some(cap) => matches!(best_time_ms, Some(best) if best <= cap),
        }
    }
}

/// Best time after observing another attempt.
///
/// The first observed time seeds the value; afterwards it is the minimum
/// over every recorded attempt, correct or not.
pub fn best_after(prev: Option<i64>, time_ms: i64) -> i64 {
    match prev {
        None => time_ms,
        Some(best) => best.min(time_ms),
    }
}
