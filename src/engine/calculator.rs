//! Survey weighting and delta computation
//!
//! This module provides the pure scoring function: ten answers are combined
//! through a fixed weight vector into a composite score, scaled to 0-100,
//! and mapped to a bounded rating delta through the band table.

use crate::engine::bands::delta_for;
use crate::error::RatingError;
use crate::types::{RatingSubmission, SURVEY_LENGTH};
use serde::{Deserialize, Serialize};

/// Tolerance for the weight-sum invariant check
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Positional weights applied to the ten survey answers.
///
/// The weights must sum to 1.0; this is an invariant of the scoring scale,
/// not a convention, and is verified at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyWeights {
    weights: [f64; SURVEY_LENGTH],
}

impl Default for SurveyWeights {
    fn default() -> Self {
        Self {
            weights: [0.05, 0.07, 0.07, 0.07, 0.05, 0.15, 0.07, 0.07, 0.15, 0.25],
        }
    }
}

impl SurveyWeights {
    /// Create a custom weight vector, enforcing the unit-sum invariant
    pub fn new(weights: [f64; SURVEY_LENGTH]) -> crate::error::Result<Self> {
        let candidate = Self { weights };
        candidate.validate()?;
        Ok(candidate)
    }

    /// Verify the weights sum to 1.0 within epsilon and are non-negative
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RatingError::ConfigurationError {
                message: "survey weights must be finite and non-negative".to_string(),
            }
            .into());
        }

        let sum: f64 = self.weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(RatingError::ConfigurationError {
                message: format!("survey weights must sum to 1.0, got {}", sum),
            }
            .into());
        }

        Ok(())
    }

    /// Weighted sum of the answers; in [1, 10] for in-range input
    pub fn composite(&self, scores: &[f64]) -> f64 {
        scores
            .iter()
            .zip(self.weights.iter())
            .map(|(score, weight)| score * weight)
            .sum()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }
}

/// Pure rating engine: ten answers in, one bounded delta out
#[derive(Debug, Clone)]
pub struct RatingEngine {
    weights: SurveyWeights,
}

impl RatingEngine {
    /// Create an engine with a validated weight vector
    pub fn new(weights: SurveyWeights) -> crate::error::Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Compute the rating delta for one set of survey answers.
    ///
    /// Fails with `InvalidSubmission` unless there are exactly ten answers,
    /// each in [1, 10]. Deterministic, no side effects.
    pub fn compute_delta(&self, scores: &[f64]) -> crate::error::Result<f64> {
        self.validate_scores(scores)?;

        let composite = self.weights.composite(scores);
        let normalized = composite * 10.0;

        Ok(delta_for(normalized))
    }

    fn validate_scores(&self, scores: &[f64]) -> crate::error::Result<()> {
        use crate::types::{MAX_SCORE, MIN_SCORE};

        if scores.len() != SURVEY_LENGTH {
            return Err(RatingError::InvalidSubmission {
                reason: format!("expected {} scores, got {}", SURVEY_LENGTH, scores.len()),
            }
            .into());
        }

        for (i, score) in scores.iter().enumerate() {
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

    /// Compute the delta for a full submission, validating its shape first
    pub fn compute_delta_for(&self, submission: &RatingSubmission) -> crate::error::Result<f64> {
        submission.validate()?;
        self.compute_delta(&submission.scores)
    }
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self {
            weights: SurveyWeights::default(),
        }
    }
}
