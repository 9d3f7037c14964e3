//! One-shot administrative commands.

use practice_core::OwnerKey;

use crate::db::Database;
use crate::error::Result;

/// Session id assigned to rows that predate owner scoping.
pub const LEGACY_SESSION: &str = "legacy-data";

/// Name of the dictionary that adopts words predating dictionaries.
pub const DEFAULT_DICTIONARY_NAME: &str = "My Dictionary";

/// Summary of one back-fill run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BackfillSummary {
    pub claimed_dictionaries: u64,
    pub claimed_words: u64,
    pub claimed_rounds: u64,
    pub assigned_words: u64,
}

/// Assign legacy rows an owner and a default dictionary.
///
/// Rows written before owner scoping carry neither owner column; rows
/// written before multiple dictionaries carry no dictionary id. Both are
/// adopted under the `legacy-data` session. Idempotent: a second run finds
/// nothing left to claim.
pub async fn backfill_legacy(db: &Database) -> Result<BackfillSummary> {
    let mut summary = BackfillSummary {
        claimed_dictionaries: db.claim_unowned_dictionaries(LEGACY_SESSION).await?,
        claimed_words: db.claim_unowned_words(LEGACY_SESSION).await?,
        claimed_rounds: db.claim_unowned_rounds(LEGACY_SESSION).await?,
        ..Default::default()
    };

    if db.count_orphan_words().await? > 0 {
        let legacy_owner = OwnerKey::Session(LEGACY_SESSION.to_string());
        let dictionary = match db
            .find_active_dictionary_by_name(&legacy_owner, DEFAULT_DICTIONARY_NAME)
            .await?
        {
            Some(existing) => existing,
            None => {
                db.create_dictionary(
                    &legacy_owner,
                    DEFAULT_DICTIONARY_NAME,
                    Some("Default dictionary containing all existing words"),
                    Some("#3b82f6"),
                )
                .await?
            }
        };

        summary.assigned_words = db.assign_orphan_words(dictionary.id).await?;
    }

    tracing::info!(
        "Back-fill complete: {} dictionaries, {} words, {} rounds claimed; {} words assigned a dictionary",
        summary.claimed_dictionaries,
        summary.claimed_words,
        summary.claimed_rounds,
        summary.assigned_words,
    );

    Ok(summary)
}
