//! Utility functions for the rating engine

use crate::types::{MAX_RATING, MIN_RATING};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Generate a new unique id for an append-only history document
pub fn generate_history_id() -> String {
    Uuid::new_v4().to_string()
}

/// Clamp a rating value to the valid domain range
pub fn clamp_rating(rating: f64) -> f64 {
    rating.clamp(MIN_RATING, MAX_RATING)
}
