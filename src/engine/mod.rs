//! Weighted-survey rating engine
//!
//! This module computes a bounded rating delta from ten survey answers:
//! a fixed weight vector produces a composite score, the composite is
//! normalized to a 0-100 scale, and an ordered band table maps the
//! normalized value to a signed delta.

pub mod bands;
pub mod calculator;

// Re-export commonly used types
pub use bands::{delta_for, DeltaBand, DELTA_BANDS};
pub use calculator::{RatingEngine, SurveyWeights};
