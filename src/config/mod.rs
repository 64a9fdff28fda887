//! Configuration for the rating engine
//!
//! This module handles configuration loading from environment variables,
//! validation, and default values.

pub mod rating;

// Re-export commonly used types
pub use rating::{CollectionNames, RatingConfig};
