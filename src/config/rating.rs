//! Rating engine configuration

use crate::error::{RatingError, Result};
use crate::types::{INITIAL_RATING, MAX_RATING, MIN_RATING};
use serde::{Deserialize, Serialize};
use std::env;

/// Names of the store collections the recorder touches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionNames {
    /// Player documents keyed by player id
    pub players: String,
    /// Accepted rating records keyed by the submission uniqueness key
    pub ratings: String,
    /// Append-only audit copies keyed by generated id
    pub rating_history: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            players: "users".to_string(),
            ratings: "ratings".to_string(),
            rating_history: "player_rating_history".to_string(),
        }
    }
}

/// Rating engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingConfig {
    /// Rating assigned to newly registered players
    pub initial_rating: f64,
    /// Lower bound of the rating scale
    pub min_rating: f64,
    /// Upper bound of the rating scale
    pub max_rating: f64,
    /// Store collection names
    pub collections: CollectionNames,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: INITIAL_RATING,
            min_rating: MIN_RATING,
            max_rating: MAX_RATING,
            collections: CollectionNames::default(),
        }
    }
}

impl RatingConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(initial) = env::var("RATING_INITIAL") {
            config.initial_rating = initial.parse().map_err(|_| {
                RatingError::ConfigurationError {
                    message: format!("Invalid RATING_INITIAL: {}", initial),
                }
            })?;
        }

        if let Ok(players) = env::var("RATING_PLAYERS_COLLECTION") {
            config.collections.players = players;
        }
        if let Ok(ratings) = env::var("RATING_RECORDS_COLLECTION") {
            config.collections.ratings = ratings;
        }
        if let Ok(history) = env::var("RATING_HISTORY_COLLECTION") {
            config.collections.rating_history = history;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.min_rating >= self.max_rating {
            return Err(RatingError::ConfigurationError {
                message: "min_rating must be below max_rating".to_string(),
            }
            .into());
        }

        if self.initial_rating < self.min_rating || self.initial_rating > self.max_rating {
            return Err(RatingError::ConfigurationError {
                message: format!(
                    "initial_rating {} outside [{}, {}]",
                    self.initial_rating, self.min_rating, self.max_rating
                ),
            }
            .into());
        }

        if self.collections.players.is_empty()
            || self.collections.ratings.is_empty()
            || self.collections.rating_history.is_empty()
        {
            return Err(RatingError::ConfigurationError {
                message: "collection names must be non-empty".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
