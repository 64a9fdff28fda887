//! Rating recorder: orchestrates one submission against persisted state
//!
//! The recorder owns the full accept path for a rating submission: duplicate
//! guard, player lookup, delta computation, clamped rating update, and the
//! three writes (player state, keyed record, history copy). It holds the
//! store behind a trait so the flow is testable without a live backend.

use crate::config::RatingConfig;
use crate::engine::RatingEngine;
use crate::error::{RatingError, Result};
use crate::store::{Document, DocumentStore};
use crate::types::{PlayerRatingState, RatingRecord, RatingSubmission};
use crate::utils::current_timestamp;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Counters over recorder operations
#[derive(Debug, Clone, Default)]
pub struct RecorderStats {
    /// Submissions accepted and persisted
    pub accepted: u64,
    /// Submissions rejected by the uniqueness guard
    pub duplicates_rejected: u64,
    /// Submissions that failed validation, lookup, or persistence
    pub failed: u64,
}

/// The rating recorder
pub struct RatingRecorder {
    store: Arc<dyn DocumentStore>,
    engine: RatingEngine,
    config: RatingConfig,
    stats: Arc<RwLock<RecorderStats>>,
}

impl RatingRecorder {
    /// Create a recorder with the default engine and configuration
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            engine: RatingEngine::default(),
            config: RatingConfig::default(),
            stats: Arc::new(RwLock::new(RecorderStats::default())),
        }
    }

    /// Create a recorder with a custom engine and validated configuration
    pub fn with_config(
        store: Arc<dyn DocumentStore>,
        engine: RatingEngine,
        config: RatingConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            store,
            engine,
            config,
            stats: Arc::new(RwLock::new(RecorderStats::default())),
        })
    }

    /// Process one rating submission.
    ///
    /// Rejects duplicates under the (match, rater, rated player) key, loads
    /// the rated player's state, computes the clamped rating update, and
    /// persists the new state plus an immutable record and a history copy.
    /// Returns the persisted [`RatingRecord`].
    pub async fn submit(&self, submission: RatingSubmission) -> Result<RatingRecord> {
        let key = submission.key();

        let result = self.submit_inner(&submission).await;
        match &result {
            Ok(record) => {
                self.bump(|s| s.accepted += 1);
                info!(
                    key = %key,
                    old_rating = record.old_rating,
                    new_rating = record.new_rating,
                    "Rating submission accepted"
                );
            }
            Err(e) => {
                if matches!(
                    e.downcast_ref::<RatingError>(),
                    Some(RatingError::DuplicateSubmission { .. })
                ) {
                    self.bump(|s| s.duplicates_rejected += 1);
                    debug!(key = %key, "Duplicate rating submission rejected");
                } else {
                    self.bump(|s| s.failed += 1);
                    warn!(key = %key, error = %e, "Rating submission failed");
                }
            }
        }

        result
    }

    async fn submit_inner(&self, submission: &RatingSubmission) -> Result<RatingRecord> {
        let key = submission.key();
        let collections = &self.config.collections;

        // Fast-path duplicate check before touching player state
        if self
            .store
            .get(&collections.ratings, key.as_str())
            .await?
            .is_some()
        {
            return Err(RatingError::DuplicateSubmission {
                key: key.to_string(),
            }
            .into());
        }

        let player_doc = self
            .store
            .get(&collections.players, &submission.rated_player_id)
            .await?
            .ok_or_else(|| RatingError::PlayerNotFound {
                player_id: submission.rated_player_id.clone(),
            })?;
        let state: PlayerRatingState = decode(player_doc, "player")?;

        let delta = self.engine.compute_delta_for(submission)?;
        let new_rating =
            (state.rating + delta).clamp(self.config.min_rating, self.config.max_rating);

        let record = RatingRecord {
            player_id: submission.rated_player_id.clone(),
            match_id: submission.match_id.clone(),
            rater_id: submission.rater_id.clone(),
            old_rating: state.rating,
            new_rating,
            answers: submission.scores.clone(),
            timestamp: current_timestamp(),
        };

        // The keyed record goes first and conditionally: a concurrent or
        // retried submission under the same key is rejected here instead of
        // applying the delta twice.
        let created = self
            .store
            .create_if_absent(&collections.ratings, key.as_str(), encode(&record)?)
            .await
            .map_err(persistence)?;
        if !created {
            return Err(RatingError::DuplicateSubmission {
                key: key.to_string(),
            }
            .into());
        }

        let updated_state = PlayerRatingState {
            rating: new_rating,
            match_count: state.match_count + 1,
        };
        self.store
            .update(
                &collections.players,
                &submission.rated_player_id,
                encode(&updated_state)?,
            )
            .await
            .map_err(persistence)?;

        self.store
            .add(&collections.rating_history, encode(&record)?)
            .await
            .map_err(persistence)?;

        Ok(record)
    }

    /// Create the initial rating state for a newly registered player.
    ///
    /// Idempotent: when the player already exists, the stored state is
    /// returned unchanged.
    pub async fn register_player(&self, player_id: &str) -> Result<PlayerRatingState> {
        let collections = &self.config.collections;
        let initial = PlayerRatingState {
            rating: self.config.initial_rating,
            match_count: 0,
        };

        let created = self
            .store
            .create_if_absent(&collections.players, player_id, encode(&initial)?)
            .await
            .map_err(persistence)?;

        if created {
            info!(player_id, rating = initial.rating, "Registered player");
            return Ok(initial);
        }

        self.player_state(player_id).await
    }

    /// Fetch a player's current rating state
    pub async fn player_state(&self, player_id: &str) -> Result<PlayerRatingState> {
        let doc = self
            .store
            .get(&self.config.collections.players, player_id)
            .await?
            .ok_or_else(|| RatingError::PlayerNotFound {
                player_id: player_id.to_string(),
            })?;

        decode(doc, "player")
    }

    /// Fetch the append-only rating history for a player, oldest first
    pub async fn history_for_player(&self, player_id: &str) -> Result<Vec<RatingRecord>> {
        let docs = self
            .store
            .query(
                &self.config.collections.rating_history,
                "playerId",
                &serde_json::Value::String(player_id.to_string()),
            )
            .await?;

        let mut records: Vec<RatingRecord> = docs
            .into_iter()
            .map(|doc| decode(doc, "rating history"))
            .collect::<Result<_>>()?;
        records.sort_by_key(|r| r.timestamp);

        Ok(records)
    }

    /// Snapshot of recorder counters
    pub fn stats(&self) -> RecorderStats {
        self.stats
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn bump(&self, f: impl FnOnce(&mut RecorderStats)) {
        if let Ok(mut stats) = self.stats.write() {
            f(&mut stats);
        }
    }
}

/// Serialize a typed value into a store document
fn encode<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(RatingError::InternalError {
            message: "document types must serialize to json objects".to_string(),
        }
        .into()),
        Err(e) => Err(RatingError::InternalError {
            message: format!("document serialization failed: {}", e),
        }
        .into()),
    }
}

/// Decode a store document through a strict schema; missing or mistyped
/// required fields are an error, never silently defaulted.
fn decode<T: DeserializeOwned>(doc: Document, what: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::Object(doc)).map_err(|e| {
        RatingError::InvalidSubmission {
            reason: format!("malformed {} document: {}", what, e),
        }
        .into()
    })
}

fn persistence(e: anyhow::Error) -> anyhow::Error {
    RatingError::PersistenceFailure {
        message: e.to_string(),
    }
    .into()
}
