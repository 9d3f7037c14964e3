//! SQLite database operations

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use practice_core::{AttemptSample, OwnerKey, RoundStatus};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the SQLite database and create the connection pool.
    ///
    /// WAL mode plus a generous busy timeout lets concurrent writers queue
    /// instead of failing; the round engine relies on writers serializing.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // === Dictionaries ===

    /// Insert a dictionary for the given owner.
    pub async fn create_dictionary(
        &self,
        owner: &OwnerKey,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Dictionary> {
        let (user_id, session_id) = owner.as_columns();
        let dictionary = sqlx::query_as::<_, Dictionary>(
            r#"
            INSERT INTO dictionaries (id, name, description, color, created_at, active, user_id, session_id)
            VALUES (?, ?, ?, ?, ?, 1, ?, ?)
            RETURNING id, name, description, color, created_at, active, user_id, session_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(color)
        .bind(Utc::now())
        .bind(user_id)
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(dictionary)
    }

    /// Look up an active dictionary by exact (post-trim) name within an
    /// owner's scope.
    pub async fn find_active_dictionary_by_name(
        &self,
        owner: &OwnerKey,
        name: &str,
    ) -> Result<Option<Dictionary>> {
        let (user_id, session_id) = owner.as_columns();
        let dictionary = sqlx::query_as::<_, Dictionary>(
            r#"
            SELECT id, name, description, color, created_at, active, user_id, session_id
            FROM dictionaries
            WHERE user_id IS ? AND session_id IS ? AND active = 1 AND name = ?
            "#,
        )
        .bind(user_id)
        .bind(session_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(dictionary)
    }

    /// Get an active dictionary by id, scoped to its owner.
    pub async fn get_active_dictionary(
        &self,
        owner: &OwnerKey,
        id: Uuid,
    ) -> Result<Option<Dictionary>> {
        let (user_id, session_id) = owner.as_columns();
        let dictionary = sqlx::query_as::<_, Dictionary>(
            r#"
            SELECT id, name, description, color, created_at, active, user_id, session_id
            FROM dictionaries
            WHERE id = ? AND user_id IS ? AND session_id IS ? AND active = 1
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(dictionary)
    }

    /// List an owner's active dictionaries with live word counts, newest
    /// first.
    pub async fn list_dictionaries_with_counts(
        &self,
        owner: &OwnerKey,
    ) -> Result<Vec<DictionaryWithCount>> {
        let (user_id, session_id) = owner.as_columns();
        let dictionaries = sqlx::query_as::<_, DictionaryWithCount>(
            r#"
            SELECT
                d.id, d.name, d.description, d.color, d.created_at, d.active,
                d.user_id, d.session_id,
                COUNT(w.id) AS word_count
            FROM dictionaries d
            LEFT JOIN words w ON w.dictionary_id = d.id AND w.active = 1
            WHERE d.user_id IS ? AND d.session_id IS ? AND d.active = 1
            GROUP BY d.id
            ORDER BY d.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(dictionaries)
    }

    /// Count an owner's active dictionaries.
    pub async fn count_active_dictionaries(&self, owner: &OwnerKey) -> Result<i64> {
        let (user_id, session_id) = owner.as_columns();
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM dictionaries WHERE user_id IS ? AND session_id IS ? AND active = 1",
        )
        .bind(user_id)
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Apply the provided fields; absent fields keep their current value.
    pub async fn update_dictionary(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE dictionaries
            SET name = COALESCE(?, name),
                description = COALESCE(?, description),
                color = COALESCE(?, color)
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(color)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Soft-delete a dictionary.
    pub async fn deactivate_dictionary(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE dictionaries SET active = 0 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // === Words ===

    /// Insert a word (text already normalized) into a dictionary.
    pub async fn create_word(
        &self,
        owner: &OwnerKey,
        dictionary_id: Uuid,
        text: &str,
        tags: Vec<String>,
        grade_level: Option<&str>,
    ) -> Result<Word> {
        let (user_id, session_id) = owner.as_columns();
        let word = sqlx::query_as::<_, Word>(
            r#"
            INSERT INTO words (id, dictionary_id, text, created_at, active, tags, grade_level, reset_at, user_id, session_id)
            VALUES (?, ?, ?, ?, 1, ?, ?, NULL, ?, ?)
            RETURNING id, dictionary_id, text, created_at, active, tags, grade_level, reset_at, user_id, session_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dictionary_id)
        .bind(text)
        .bind(Utc::now())
        .bind(Json(tags))
        .bind(grade_level)
        .bind(user_id)
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(word)
    }

    /// Look up an active word by normalized text within a dictionary.
    pub async fn find_active_word(&self, dictionary_id: Uuid, text: &str) -> Result<Option<Word>> {
        let word = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, dictionary_id, text, created_at, active, tags, grade_level, reset_at, user_id, session_id
            FROM words
            WHERE dictionary_id = ? AND text = ? AND active = 1
            "#,
        )
        .bind(dictionary_id)
        .bind(text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// Get an active word by id, scoped to its owner.
    pub async fn get_active_word(&self, owner: &OwnerKey, id: Uuid) -> Result<Option<Word>> {
        let (user_id, session_id) = owner.as_columns();
        let word = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, dictionary_id, text, created_at, active, tags, grade_level, reset_at, user_id, session_id
            FROM words
            WHERE id = ? AND user_id IS ? AND session_id IS ? AND active = 1
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(word)
    }

    /// Active words of a dictionary, sorted by text.
    pub async fn list_active_words(&self, dictionary_id: Uuid) -> Result<Vec<Word>> {
        let words = sqlx::query_as::<_, Word>(
            r#"
            SELECT id, dictionary_id, text, created_at, active, tags, grade_level, reset_at, user_id, session_id
            FROM words
            WHERE dictionary_id = ? AND active = 1
            ORDER BY text
            "#,
        )
        .bind(dictionary_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(words)
    }

    /// Count a dictionary's active words.
    pub async fn count_active_words(&self, dictionary_id: Uuid) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM words WHERE dictionary_id = ? AND active = 1")
                .bind(dictionary_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Set the soft-reset cutoff on one word.
    pub async fn reset_word_stats(&self, id: Uuid, cutoff: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE words SET reset_at = ? WHERE id = ?")
            .bind(cutoff)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Set the soft-reset cutoff on every active word of a dictionary.
    pub async fn reset_dictionary_stats(
        &self,
        dictionary_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("UPDATE words SET reset_at = ? WHERE dictionary_id = ? AND active = 1")
            .bind(cutoff)
            .bind(dictionary_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Set the soft-reset cutoff on every active word the owner has.
    pub async fn reset_all_stats(&self, owner: &OwnerKey, cutoff: DateTime<Utc>) -> Result<()> {
        let (user_id, session_id) = owner.as_columns();
        sqlx::query(
            "UPDATE words SET reset_at = ? WHERE user_id IS ? AND session_id IS ? AND active = 1",
        )
        .bind(cutoff)
        .bind(user_id)
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a word: deactivate it, then purge its attempt history.
    ///
    /// Two explicit steps in one transaction; the attempt rows are gone for
    /// good even though the word row itself survives soft-deleted.
    pub async fn delete_word(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE words SET active = 0 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM attempts WHERE word_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // === Attempts ===

    /// Append a free-practice attempt row.
    pub async fn record_attempt(
        &self,
        owner: &OwnerKey,
        word_id: Uuid,
        correct: bool,
        time_ms: i64,
    ) -> Result<Attempt> {
        let (user_id, session_id) = owner.as_columns();
        let attempt = sqlx::query_as::<_, Attempt>(
            r#"
            INSERT INTO attempts (id, word_id, correct, time_ms, created_at, round_id, user_id, session_id)
            VALUES (?, ?, ?, ?, ?, NULL, ?, ?)
            RETURNING id, word_id, correct, time_ms, created_at, round_id, user_id, session_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(word_id)
        .bind(correct)
        .bind(time_ms)
        .bind(Utc::now())
        .bind(user_id)
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(attempt)
    }

    /// A word's full attempt history as statistics samples.
    pub async fn attempt_samples(&self, word_id: Uuid) -> Result<Vec<AttemptSample>> {
        let rows = sqlx::query_as::<_, (bool, i64, DateTime<Utc>)>(
            "SELECT correct, time_ms, created_at FROM attempts WHERE word_id = ? ORDER BY created_at",
        )
        .bind(word_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(correct, time_ms, created_at)| AttemptSample {
                correct,
                time_ms,
                created_at,
            })
            .collect())
    }

    // === Rounds ===

    /// Create a round and one item per word, atomically.
    ///
    /// Word ids are taken as given (no ownership or cross-dictionary
    /// checks); duplicates in the input collapse to one item.
    pub async fn start_round(
        &self,
        owner: &OwnerKey,
        word_ids: &[Uuid],
        reps_per_word: i64,
        max_time_ms: Option<i64>,
    ) -> Result<Uuid> {
        let (user_id, session_id) = owner.as_columns();
        let round_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO rounds (id, created_at, status, reps_per_word, max_time_ms, user_id, session_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(round_id)
        .bind(Utc::now())
        .bind(RoundStatus::Active.as_str())
        .bind(reps_per_word)
        .bind(max_time_ms)
        .bind(user_id)
        .bind(session_id)
        .execute(&mut *tx)
        .await?;

        let mut seen = Vec::with_capacity(word_ids.len());
        for word_id in word_ids {
            if seen.contains(word_id) {
                continue;
            }
            seen.push(*word_id);

            sqlx::query(
                r#"
                INSERT INTO round_items (id, round_id, word_id, reps_done, best_time_ms, solved)
                VALUES (?, ?, ?, 0, NULL, 0)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(round_id)
            .bind(word_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(round_id)
    }

    /// Record one attempt against a round: append the attempt row, advance
    /// the item, and close the round when every item is solved.
    ///
    /// The whole unit is one transaction; a missing round or item rolls the
    /// attempt row back too. The item update is a single in-place statement
    /// (reps add, best-time min) so concurrent recorders cannot overwrite
    /// each other's progress.
    pub async fn record_round_attempt(
        &self,
        owner: &OwnerKey,
        round_id: Uuid,
        word_id: Uuid,
        time_ms: i64,
        correct: bool,
    ) -> Result<()> {
        let (user_id, session_id) = owner.as_columns();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO attempts (id, word_id, correct, time_ms, created_at, round_id, user_id, session_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(word_id)
        .bind(correct)
        .bind(time_ms)
        .bind(Utc::now())
        .bind(round_id)
        .bind(user_id)
        .bind(session_id)
        .execute(&mut *tx)
        .await?;

        let round = sqlx::query_as::<_, Round>(
            r#"
            SELECT id, created_at, status, reps_per_word, max_time_ms, user_id, session_id
            FROM rounds
            WHERE id = ? AND user_id IS ? AND session_id IS ?
            "#,
        )
        .bind(round_id)
        .bind(user_id)
        .bind(session_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Round not found".to_string()))?;

        let item = sqlx::query_as::<_, RoundItem>(
            r#"
            UPDATE round_items
            SET reps_done = reps_done + ?,
                best_time_ms = MIN(COALESCE(best_time_ms, ?), ?)
            WHERE round_id = ? AND word_id = ?
            RETURNING id, round_id, word_id, reps_done, best_time_ms, solved
            "#,
        )
        .bind(if correct { 1_i64 } else { 0 })
        .bind(time_ms)
        .bind(time_ms)
        .bind(round_id)
        .bind(word_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Round item not found".to_string()))?;

        let solved = round.policy().satisfied_by(item.reps_done, item.best_time_ms);
        if solved != item.solved {
            sqlx::query("UPDATE round_items SET solved = ? WHERE id = ?")
                .bind(solved)
                .bind(item.id)
                .execute(&mut *tx)
                .await?;
        }

        let unsolved: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM round_items WHERE round_id = ? AND solved = 0")
                .bind(round_id)
                .fetch_one(&mut *tx)
                .await?;
        if unsolved == 0 {
            sqlx::query("UPDATE rounds SET status = ? WHERE id = ?")
                .bind(RoundStatus::Done.as_str())
                .bind(round_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Round projection for clients: the round, its items, and solved
    /// counts. Pure read.
    pub async fn get_round_state(
        &self,
        owner: &OwnerKey,
        round_id: Uuid,
    ) -> Result<Option<RoundStateResponse>> {
        let (user_id, session_id) = owner.as_columns();
        let round = sqlx::query_as::<_, Round>(
            r#"
            SELECT id, created_at, status, reps_per_word, max_time_ms, user_id, session_id
            FROM rounds
            WHERE id = ? AND user_id IS ? AND session_id IS ?
            "#,
        )
        .bind(round_id)
        .bind(user_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(round) = round else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, RoundItem>(
            r#"
            SELECT id, round_id, word_id, reps_done, best_time_ms, solved
            FROM round_items
            WHERE round_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(round_id)
        .fetch_all(&self.pool)
        .await?;

        let solved = items.iter().filter(|i| i.solved).count() as i64;
        let total = items.len() as i64;

        Ok(Some(RoundStateResponse {
            round,
            items,
            solved,
            total,
        }))
    }

    // === Legacy back-fill ===

    /// Claim unowned dictionaries for a legacy session. Returns the number
    /// of rows claimed.
    pub async fn claim_unowned_dictionaries(&self, session_id: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE dictionaries SET session_id = ? WHERE user_id IS NULL AND session_id IS NULL",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Claim unowned words for a legacy session.
    pub async fn claim_unowned_words(&self, session_id: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE words SET session_id = ? WHERE user_id IS NULL AND session_id IS NULL",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Claim unowned rounds for a legacy session.
    pub async fn claim_unowned_rounds(&self, session_id: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE rounds SET session_id = ? WHERE user_id IS NULL AND session_id IS NULL",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Number of words not yet assigned to any dictionary.
    pub async fn count_orphan_words(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM words WHERE dictionary_id IS NULL")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Assign every dictionary-less word to the given dictionary.
    pub async fn assign_orphan_words(&self, dictionary_id: Uuid) -> Result<u64> {
        let result = sqlx::query("UPDATE words SET dictionary_id = ? WHERE dictionary_id IS NULL")
            .bind(dictionary_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
