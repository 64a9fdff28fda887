//! Delta band table for normalized survey scores
//!
//! The mapping from a normalized score to a rating delta is kept as a single
//! ordered table so the bands stay auditable and testable independently of
//! the surrounding orchestration. Gains are capped at +5 while losses reach
//! -8: the rating is harder to farm upward than to lose.

/// One closed-interval band of the normalized-score scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaBand {
    /// Inclusive lower bound of the normalized score
    pub min: f64,
    /// Inclusive upper bound of the normalized score
    pub max: f64,
    /// Rating delta applied when the score falls in this band
    pub delta: f64,
}

/// Ordered, non-overlapping bands; evaluated top to bottom, first match wins.
/// Bounds are compared directly, with no rounding before comparison.
pub const DELTA_BANDS: &[DeltaBand] = &[
    DeltaBand {
        min: 90.0,
        max: 100.0,
        delta: 5.0,
    },
    DeltaBand {
        min: 75.0,
        max: 89.9,
        delta: 3.0,
    },
    DeltaBand {
        min: 65.0,
        max: 74.9,
        delta: 2.0,
    },
    DeltaBand {
        min: 50.0,
        max: 64.9,
        delta: 1.0,
    },
    DeltaBand {
        min: 40.0,
        max: 49.9,
        delta: -1.0,
    },
    DeltaBand {
        min: 25.0,
        max: 39.9,
        delta: -2.0,
    },
    DeltaBand {
        min: 15.0,
        max: 24.9,
        delta: -4.0,
    },
    DeltaBand {
        min: 1.0,
        max: 14.9,
        delta: -8.0,
    },
];

/// Map a normalized score to its rating delta.
///
/// Returns 0.0 when no band matches. Answers on the whole-number survey
/// scale always produce a normalized score in tenths, which always lands in
/// a band, so the zero path is a defensive default only.
pub fn delta_for(normalized: f64) -> f64 {
    for band in DELTA_BANDS {
        if normalized >= band.min && normalized <= band.max {
            return band.delta;
        }
    }

    0.0
}
