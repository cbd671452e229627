//! Tuning knobs for scoring and ranking.
//!
//! Typically loaded from a JSON file by the application crate; every field
//! has a default so partial files work.

use crate::DEFAULT_GRID_HALF_SIZE;

/// Constants of the point-scoring formula.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringWeights {
    /// Starting score before adjustments.  Default: 7.0.
    pub base_score: f64,

    /// A flow segment counts if its nearest vertex is within this many
    /// metres.  Default: 100.
    pub flow_radius_m: f64,

    /// Multiplier on `(congestion_ratio − 1)` per nearby segment, so slowdown
    /// lowers the score.  This is the negation of the `(1 − ratio)·2` form
    /// sometimes quoted for the flow term.  Default: 2.
    pub flow_weight: f64,

    /// An incident counts if it is within this many metres.  Default: 300.
    pub incident_radius_m: f64,

    /// Subtracted once per nearby incident, uncapped.  Default: 1.0.
    pub incident_penalty: f64,

    /// Mean distance to existing sites is divided by this.  Default: 1000 m.
    pub spacing_scale_m: f64,

    /// Upper bound on the spacing bonus.  Default: 2.0.
    pub spacing_cap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_score:        7.0,
            flow_radius_m:     100.0,
            flow_weight:       2.0,
            incident_radius_m: 300.0,
            incident_penalty:  1.0,
            spacing_scale_m:   1_000.0,
            spacing_cap:       2.0,
        }
    }
}

/// Ranking parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecommendConfig {
    /// Maximum number of candidates returned.  Default: 5.
    pub top_k: usize,

    /// Candidates closer than this to any existing site are discarded.
    /// Default: 200 m.
    pub min_clearance_m: f64,

    /// Candidates scoring at or below this are discarded.  Default: 7.0.
    pub score_threshold: f64,

    /// Grid steps in each direction from the centre.  Default: 10 (441
    /// candidates).
    pub grid_half_size: u32,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_k:           5,
            min_clearance_m: 200.0,
            score_threshold: 7.0,
            grid_half_size:  DEFAULT_GRID_HALF_SIZE,
        }
    }
}
