//! Top-K site recommendation.

use em_core::{Coordinate, EmResult, ExistingSite};
use em_traffic::{TrafficProvider, TrafficResult, TrafficSnapshot};

use crate::{CandidateGrid, PointScorer, Reason, RecommendConfig, ScoringWeights};

// ── CandidateSite ─────────────────────────────────────────────────────────────

/// One recommended location.  Produced fresh per run; never persisted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateSite {
    pub location: Coordinate,
    /// In `[0, 10]`.
    pub score:    f64,
    pub reasons:  Vec<Reason>,
}

// ── Recommender ───────────────────────────────────────────────────────────────

/// Holds ranking and scoring configuration for repeated runs.
///
/// # Determinism
///
/// For fixed inputs the output is identical across calls and across the
/// sequential and `parallel` builds: scores are collected in grid order and
/// then stable-sorted, so equal scores keep generation order.
#[derive(Clone, Debug, Default)]
pub struct Recommender {
    config:  RecommendConfig,
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(config: RecommendConfig, weights: ScoringWeights) -> Self {
        Self { config, weights }
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank candidates around `center` and return at most `top_k`, best
    /// first.
    ///
    /// Fewer than `top_k` are returned when fewer clear both the clearance
    /// and the score threshold; the list is never padded.
    ///
    /// # Errors
    /// Grid construction errors: invalid `center`, non-positive `radius_m`,
    /// or a zero `grid_half_size` in the config.
    pub fn recommend(
        &self,
        center:   Coordinate,
        radius_m: f64,
        snapshot: &TrafficSnapshot,
        existing: &[ExistingSite],
    ) -> EmResult<Vec<CandidateSite>> {
        let cfg = &self.config;
        let grid = CandidateGrid::new(center, radius_m, cfg.grid_half_size)?;
        let scorer = PointScorer::new(snapshot, existing, self.weights.clone());

        // ── ① Clearance ───────────────────────────────────────────────────
        let clear: Vec<Coordinate> = grid
            .iter()
            .filter(|&c| scorer.nearest_site_m(c).is_none_or(|d| d >= cfg.min_clearance_m))
            .collect();

        // ── ② Score (order-preserving) ────────────────────────────────────
        let scored = score_all(&scorer, clear);
        let scored_count = scored.len();

        // ── ③ Threshold ───────────────────────────────────────────────────
        let mut ranked: Vec<CandidateSite> = scored
            .into_iter()
            .filter(|c| c.score > cfg.score_threshold)
            .collect();
        let qualifying = ranked.len();

        // ── ④ Rank ────────────────────────────────────────────────────────
        // `sort_by` is stable: ties keep grid order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(cfg.top_k);

        log::debug!(
            "recommend around {center} (r = {radius_m} m): {} grid points, {scored_count} clear of existing sites, \
             {qualifying} above {:.1}, returning {}",
            grid.len(),
            cfg.score_threshold,
            ranked.len()
        );
        Ok(ranked)
    }

    /// Fetch a snapshot from `provider` and rank against it.
    pub fn recommend_from<P: TrafficProvider + ?Sized>(
        &self,
        provider: &P,
        center:   Coordinate,
        radius_m: f64,
        existing: &[ExistingSite],
    ) -> TrafficResult<Vec<CandidateSite>> {
        let snapshot = provider.fetch_snapshot(center, radius_m)?;
        Ok(self.recommend(center, radius_m, &snapshot, existing)?)
    }
}

/// Score every candidate, preserving input order in the output.
///
/// With the `parallel` Cargo feature this runs on Rayon's thread pool.
fn score_all(scorer: &PointScorer<'_>, candidates: Vec<Coordinate>) -> Vec<CandidateSite> {
    let to_site = |location: Coordinate| {
        let s = scorer.score(location);
        CandidateSite { location, score: s.score, reasons: s.reasons }
    };

    #[cfg(not(feature = "parallel"))]
    {
        candidates.into_iter().map(to_site).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        // Indexed `collect` keeps the input order.
        candidates.into_par_iter().map(to_site).collect()
    }
}

/// [`Recommender::recommend`] with default configuration and weights
/// (`top_k = 5`, `min_clearance_m = 200`, `score_threshold = 7.0`, 21 × 21
/// grid).
pub fn recommend(
    center:   Coordinate,
    radius_m: f64,
    snapshot: &TrafficSnapshot,
    existing: &[ExistingSite],
) -> EmResult<Vec<CandidateSite>> {
    Recommender::default().recommend(center, radius_m, snapshot, existing)
}
