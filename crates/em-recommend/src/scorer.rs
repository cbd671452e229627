//! Multi-factor score for one candidate coordinate.
//!
//! ```text
//! score = clamp( base
//!              + Σ_{segments, nearest vertex ≤ 100 m} (congestion_ratio − 1) · 2
//!              − 1.0 · #{incidents ≤ 300 m}
//!              + min(2, mean_distance_to_existing_m / 1000),
//!              0, 10 )
//! ```
//!
//! Constants come from [`ScoringWeights`].  Each segment contributes at most
//! once: nothing on a free-flowing road, a penalty of up to `2` on a stalled
//! one, and a small bonus on a road running faster than its free-flow speed.
//! Incident penalties accumulate without a cap, so a candidate in an
//! incident cluster clamps to zero.  With no existing sites the spacing term
//! is zero.
//!
//! The flow term is the negation of the literal `(1 − ratio)·2` form, which
//! would reward slow roads.
//!
//! [`score_point`] evaluates the formula by linear scan. [`PointScorer`]
//! evaluates the same formula through a [`SnapshotIndex`] and is what the
//! ranker uses; both sum terms in snapshot order, so their results are
//! bit-identical.

use em_core::{Coordinate, ExistingSite};
use em_traffic::{SnapshotIndex, TrafficSnapshot};

use crate::{Reason, ScoringWeights, recommendation_reasons};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

// ── Output types ──────────────────────────────────────────────────────────────

/// Final clamped score plus its justification tags.
#[derive(Clone, Debug, PartialEq)]
pub struct PointScore {
    pub score:   f64,
    pub reasons: Vec<Reason>,
}

/// The unclamped terms of the formula, for logging and diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub base:             f64,
    pub flow_term:        f64,
    /// Number of incidents inside the incident radius.
    pub nearby_incidents: usize,
    pub incident_penalty: f64,
    pub spacing_bonus:    f64,
}

impl ScoreBreakdown {
    /// Sum of all terms before clamping.
    pub fn raw_total(&self) -> f64 {
        self.base + self.flow_term - self.incident_penalty + self.spacing_bonus
    }

    /// [`raw_total`](Self::raw_total) clamped to `[0, 10]`.
    pub fn score(&self) -> f64 {
        self.raw_total().clamp(MIN_SCORE, MAX_SCORE)
    }
}

// ── Shared terms ──────────────────────────────────────────────────────────────

fn spacing_bonus(candidate: Coordinate, existing: &[ExistingSite], w: &ScoringWeights) -> f64 {
    if existing.is_empty() {
        return 0.0;
    }
    let total: f64 = existing.iter().map(|s| s.location.distance_m(candidate)).sum();
    let mean_m = total / existing.len() as f64;
    (mean_m / w.spacing_scale_m).min(w.spacing_cap)
}

fn breakdown_from(
    flow_term:        f64,
    nearby_incidents: usize,
    spacing_bonus:    f64,
    w:                &ScoringWeights,
) -> ScoreBreakdown {
    ScoreBreakdown {
        base: w.base_score,
        flow_term,
        nearby_incidents,
        incident_penalty: nearby_incidents as f64 * w.incident_penalty,
        spacing_bonus,
    }
}

// ── Linear reference ──────────────────────────────────────────────────────────

/// Score `candidate` with default [`ScoringWeights`] by scanning every
/// segment, incident and site.  O(S + I + E).
pub fn score_point(candidate: Coordinate, snapshot: &TrafficSnapshot, existing: &[ExistingSite]) -> PointScore {
    let w = ScoringWeights::default();
    let b = linear_breakdown(candidate, snapshot, existing, &w);
    let score = b.score();
    PointScore { score, reasons: recommendation_reasons(score, snapshot) }
}

pub(crate) fn linear_breakdown(
    candidate: Coordinate,
    snapshot:  &TrafficSnapshot,
    existing:  &[ExistingSite],
    w:         &ScoringWeights,
) -> ScoreBreakdown {
    let flow_term: f64 = snapshot
        .flow
        .iter()
        .filter(|s| s.nearest_vertex_m(candidate).is_some_and(|d| d <= w.flow_radius_m))
        .map(|s| (s.congestion_ratio() - 1.0) * w.flow_weight)
        .sum();

    let nearby_incidents = snapshot
        .incidents
        .iter()
        .filter(|i| i.location.distance_m(candidate) <= w.incident_radius_m)
        .count();

    breakdown_from(flow_term, nearby_incidents, spacing_bonus(candidate, existing, w), w)
}

// ── PointScorer ───────────────────────────────────────────────────────────────

/// Scores many candidates against one snapshot and one set of sites.
///
/// Construction bulk-loads a [`SnapshotIndex`]; after that the scorer is
/// read-only and `Sync`, so the ranker can share it across worker threads.
pub struct PointScorer<'a> {
    snapshot: &'a TrafficSnapshot,
    existing: &'a [ExistingSite],
    index:    SnapshotIndex,
    weights:  ScoringWeights,
}

impl<'a> PointScorer<'a> {
    pub fn new(snapshot: &'a TrafficSnapshot, existing: &'a [ExistingSite], weights: ScoringWeights) -> Self {
        Self { snapshot, existing, index: SnapshotIndex::build(snapshot), weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// All terms of the formula for `candidate`.
    pub fn breakdown(&self, candidate: Coordinate) -> ScoreBreakdown {
        let w = &self.weights;
        let flow_term: f64 = self
            .index
            .segments_within(candidate, w.flow_radius_m)
            .into_iter()
            .map(|(i, _)| (self.snapshot.flow[i].congestion_ratio() - 1.0) * w.flow_weight)
            .sum();

        let nearby_incidents = self.index.incidents_within(candidate, w.incident_radius_m).len();

        breakdown_from(flow_term, nearby_incidents, spacing_bonus(candidate, self.existing, w), w)
    }

    /// Clamped score and reasons for `candidate`.
    pub fn score(&self, candidate: Coordinate) -> PointScore {
        let b = self.breakdown(candidate);
        let score = b.score();
        log::trace!(
            "candidate {candidate}: flow {:+.3}, incidents {} ({:+.1}), spacing {:+.3} → {score:.3}",
            b.flow_term,
            b.nearby_incidents,
            -b.incident_penalty,
            b.spacing_bonus,
        );
        PointScore { score, reasons: recommendation_reasons(score, self.snapshot) }
    }

    /// Distance in metres to the closest existing site, `None` if there are
    /// no sites.
    pub fn nearest_site_m(&self, candidate: Coordinate) -> Option<f64> {
        self.existing
            .iter()
            .map(|s| s.location.distance_m(candidate))
            .min_by(f64::total_cmp)
    }
}
