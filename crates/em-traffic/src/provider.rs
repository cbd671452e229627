//! The traffic-provider seam.
//!
//! # Pluggability
//!
//! The recommender never fetches data itself.  An application implements
//! [`TrafficProvider`] against its live feed (API keys, retries, rate limits
//! and HTTP status handling all live there) and hands the resulting
//! [`TrafficSnapshot`] to the engine.  Two implementations ship here:
//!
//! - [`StaticProvider`] replays one fixed snapshot.  Used by tests.
//! - [`SyntheticProvider`] generates a plausible, seeded snapshot around the
//!   query centre, for demos and offline runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use em_core::{Coordinate, EmError, EmResult, degrees_per_meter};

use crate::{IncidentKind, TrafficFlowSegment, TrafficIncident, TrafficResult, TrafficSnapshot};

// ── TrafficProvider trait ─────────────────────────────────────────────────────

/// Source of traffic snapshots.
///
/// A call is treated as blocking with no built-in timeout; an empty snapshot
/// is a valid answer.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one provider can serve several
/// recommendation runs concurrently.
pub trait TrafficProvider: Send + Sync {
    /// Read current flow and incidents within `radius_m` of `center`.
    fn fetch_snapshot(&self, center: Coordinate, radius_m: f64) -> TrafficResult<TrafficSnapshot>;
}

fn check_query(center: Coordinate, radius_m: f64) -> TrafficResult<()> {
    center.validate()?;
    if !(radius_m.is_finite() && radius_m > 0.0) {
        return Err(EmError::InvalidParameter(format!("radius_m must be positive, got {radius_m}")).into());
    }
    Ok(())
}

// ── StaticProvider ────────────────────────────────────────────────────────────

/// Returns a clone of the same snapshot for every query.
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    snapshot: TrafficSnapshot,
}

impl StaticProvider {
    pub fn new(snapshot: TrafficSnapshot) -> Self {
        Self { snapshot }
    }
}

impl TrafficProvider for StaticProvider {
    fn fetch_snapshot(&self, center: Coordinate, radius_m: f64) -> TrafficResult<TrafficSnapshot> {
        check_query(center, radius_m)?;
        Ok(self.snapshot.clone())
    }
}

// ── SyntheticProvider ─────────────────────────────────────────────────────────

/// Shape of the generated data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyntheticConfig {
    /// Master seed.  The same seed and query always produce the same snapshot.
    pub seed: u64,
    pub segment_count: usize,
    /// Vertices per generated polyline (at least 2).
    pub vertices_per_segment: usize,
    /// Spacing between consecutive vertices, metres.
    pub vertex_spacing_m: f64,
    pub incident_count: usize,
    /// Free-flow speed range, km/h.
    pub free_flow_kmh: (f64, f64),
    /// Range of `current / free_flow` drawn per segment.
    pub congestion_ratio: (f64, f64),
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed:                 42,
            segment_count:        12,
            vertices_per_segment: 6,
            vertex_spacing_m:     40.0,
            incident_count:       3,
            free_flow_kmh:        (30.0, 60.0),
            congestion_ratio:     (0.25, 1.05),
        }
    }
}

impl SyntheticConfig {
    /// Reject ranges the generator cannot sample from.
    ///
    /// Both ranges must be finite with `low ≤ high`; free-flow speeds must be
    /// positive, ratios non-negative, and the vertex spacing finite and
    /// non-negative.
    pub fn validate(&self) -> EmResult<()> {
        check_range("free_flow_kmh", self.free_flow_kmh, |lo| lo > 0.0)?;
        check_range("congestion_ratio", self.congestion_ratio, |lo| lo >= 0.0)?;
        if !(self.vertex_spacing_m.is_finite() && self.vertex_spacing_m >= 0.0) {
            return Err(EmError::InvalidParameter(format!(
                "vertex_spacing_m must be finite and non-negative, got {}",
                self.vertex_spacing_m
            )));
        }
        Ok(())
    }
}

fn check_range(name: &str, (lo, hi): (f64, f64), low_ok: impl Fn(f64) -> bool) -> EmResult<()> {
    if lo.is_finite() && hi.is_finite() && lo <= hi && low_ok(lo) {
        Ok(())
    } else {
        Err(EmError::InvalidParameter(format!("{name} range ({lo}, {hi}) is empty or out of bounds")))
    }
}

/// Seeded random snapshot generator.
///
/// Generation happens entirely inside `fetch_snapshot`; scoring code never
/// sees randomness.
#[derive(Clone, Debug, Default)]
pub struct SyntheticProvider {
    config: SyntheticConfig,
}

impl SyntheticProvider {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyntheticConfig {
        &self.config
    }

    /// Uniform point in the square of half-width `radius_m` around `center`.
    fn random_point(rng: &mut SmallRng, center: Coordinate, radius_m: f64) -> Coordinate {
        let (lat_step, lon_step) = degrees_per_meter(center.lat);
        let dy = rng.gen_range(-radius_m..=radius_m);
        let dx = rng.gen_range(-radius_m..=radius_m);
        center.offset(dy * lat_step, dx * lon_step).wrapped()
    }

    fn random_segment(&self, rng: &mut SmallRng, center: Coordinate, radius_m: f64) -> TrafficFlowSegment {
        let cfg = &self.config;
        let (lat_step, lon_step) = degrees_per_meter(center.lat);
        let heading = rng.gen_range(0.0..std::f64::consts::TAU);
        let (dy, dx) = (heading.sin() * cfg.vertex_spacing_m, heading.cos() * cfg.vertex_spacing_m);

        let start = Self::random_point(rng, center, radius_m);
        let coordinates = (0..cfg.vertices_per_segment.max(2))
            .map(|k| start.offset(k as f64 * dy * lat_step, k as f64 * dx * lon_step).wrapped())
            .collect();

        let free_flow = rng.gen_range(cfg.free_flow_kmh.0..=cfg.free_flow_kmh.1);
        let ratio = rng.gen_range(cfg.congestion_ratio.0..=cfg.congestion_ratio.1);
        TrafficFlowSegment::new(coordinates, free_flow * ratio, free_flow)
    }

    fn random_incident(rng: &mut SmallRng, center: Coordinate, radius_m: f64) -> TrafficIncident {
        let (kind, description) = match rng.gen_range(0..4u8) {
            0 => (IncidentKind::Accident, "Minor collision reported"),
            1 => (IncidentKind::Construction, "Lane closed for roadworks"),
            2 => (IncidentKind::Congestion, "Slow traffic"),
            _ => (IncidentKind::Other, "Road hazard"),
        };
        TrafficIncident::new(kind, Self::random_point(rng, center, radius_m), description)
    }
}

impl TrafficProvider for SyntheticProvider {
    fn fetch_snapshot(&self, center: Coordinate, radius_m: f64) -> TrafficResult<TrafficSnapshot> {
        check_query(center, radius_m)?;
        self.config.validate()?;

        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let flow = (0..self.config.segment_count)
            .map(|_| self.random_segment(&mut rng, center, radius_m))
            .collect();
        let incidents = (0..self.config.incident_count)
            .map(|_| Self::random_incident(&mut rng, center, radius_m))
            .collect();

        log::debug!(
            "synthetic snapshot around {center} (r = {radius_m} m, seed = {})",
            self.config.seed
        );
        Ok(TrafficSnapshot::new(flow, incidents))
    }
}
