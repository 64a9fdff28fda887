//! Teamatch Rating - Player rating engine for the teamatch app
//!
//! This crate computes post-match skill rating updates from weighted
//! ten-question surveys and records them against a pluggable document
//! store, with duplicate-submission rejection and an append-only audit
//! history.

pub mod config;
pub mod engine;
pub mod error;
pub mod recorder;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use engine::{RatingEngine, SurveyWeights};
pub use recorder::{RatingRecorder, RecorderStats};
pub use store::{Document, DocumentStore, InMemoryDocumentStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
