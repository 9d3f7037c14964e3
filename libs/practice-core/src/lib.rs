//! Core domain library for the wordround practice backend.
//!
//! Provides:
//! - Owner keys scoping dictionaries, words, and rounds to their creator
//! - Round goal math (repetition targets, best-time tracking, completion)
//! - Attempt statistics (accuracy, typical time, high score)
//! - Word and dictionary name normalization

pub mod error;
pub mod round;
pub mod stats;
pub mod text;
pub mod types;

pub use error::{Result, ValidationError};
pub use round::{best_after, RoundPolicy};
pub use stats::{compute_stats, median, AttemptSample};
pub use text::{normalize_dictionary_name, normalize_word};
pub use types::{OwnerKey, RoundStatus, WordStats};
