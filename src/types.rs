//! Common types used throughout the rating engine

use crate::error::RatingError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for matches
pub type MatchId = String;

/// Number of survey questions answered per rating submission
pub const SURVEY_LENGTH: usize = 10;

/// Lowest allowed answer on a survey question
pub const MIN_SCORE: f64 = 1.0;

/// Highest allowed answer on a survey question
pub const MAX_SCORE: f64 = 10.0;

/// Lower bound of a player's persisted rating
pub const MIN_RATING: f64 = 0.0;

/// Upper bound of a player's persisted rating
pub const MAX_RATING: f64 = 100.0;

/// Rating assigned to every player at registration
pub const INITIAL_RATING: f64 = 50.0;

/// One rater's answers about one player in the context of one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSubmission {
    pub rater_id: PlayerId,
    pub rated_player_id: PlayerId,
    pub match_id: MatchId,
    /// Exactly [`SURVEY_LENGTH`] answers, each in [[`MIN_SCORE`], [`MAX_SCORE`]]
    pub scores: Vec<f64>,
}

impl RatingSubmission {
    /// Check the submission's shape: exactly ten answers, each within range.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.scores.len() != SURVEY_LENGTH {
            return Err(RatingError::InvalidSubmission {
                reason: format!(
                    "expected {} scores, got {}",
                    SURVEY_LENGTH,
                    self.scores.len()
                ),
            }
            .into());
        }

        for (i, score) in self.scores.iter().enumerate() {
            if !score.is_finite() || *score < MIN_SCORE || *score > MAX_SCORE {
                return Err(RatingError::InvalidSubmission {
                    reason: format!(
                        "score {} at position {} is outside [{}, {}]",
                        score, i, MIN_SCORE, MAX_SCORE
                    ),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Deterministic uniqueness key for this (match, rater, rated player) triple
    pub fn key(&self) -> SubmissionKey {
        SubmissionKey::new(&self.match_id, &self.rater_id, &self.rated_player_id)
    }
}

/// Deterministic identifier derived from (match, rater, rated player),
/// used to reject duplicate submissions before any write occurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionKey(String);

impl SubmissionKey {
    pub fn new(match_id: &str, rater_id: &str, rated_player_id: &str) -> Self {
        Self(format!("{}_{}_{}", match_id, rater_id, rated_player_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmissionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable record of one accepted rating submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub rater_id: PlayerId,
    /// Rating before this submission was applied
    pub old_rating: f64,
    /// Rating after the clamped delta
    pub new_rating: f64,
    /// The original ten answers, preserved verbatim for audit/replay
    pub answers: Vec<f64>,
    pub timestamp: DateTime<Utc>,
}

/// A player's persisted rating state, mutated once per accepted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRatingState {
    pub rating: f64,
    pub match_count: u64,
}

impl Default for PlayerRatingState {
    fn default() -> Self {
        Self {
            rating: INITIAL_RATING,
            match_count: 0,
        }
    }
}
