//! Scalar traffic metrics derived from a [`TrafficSnapshot`].
//!
//! Each reduction has a neutral fallback for a snapshot with no usable
//! segments:
//!
//! | Metric               | Range      | No-data value |
//! |----------------------|------------|---------------|
//! | `traffic_score`      | `[0, 10]`  | `5.0`         |
//! | `overall_congestion` | `[0, 100]` | `50.0`        |
//! | `average_speed`      | km/h       | `40.0`        |

use em_core::Coordinate;

use crate::TrafficSnapshot;

pub const NEUTRAL_TRAFFIC_SCORE: f64 = 5.0;
pub const NEUTRAL_CONGESTION_PCT: f64 = 50.0;
pub const NEUTRAL_SPEED_KMH: f64 = 40.0;

fn mean(mut values: impl Iterator<Item = f64>) -> Option<f64> {
    let first = values.next()?;
    let (sum, n) = values.fold((first, 1usize), |(s, n), v| (s + v, n + 1));
    Some(sum / n as f64)
}

/// Mean per-segment flow score in `[0, 10]`; `10` is free-flowing.
///
/// Each segment scores `min(10, congestion_ratio · 10)`.
pub fn traffic_score(snapshot: &TrafficSnapshot) -> f64 {
    mean(snapshot.flow.iter().map(|s| (s.congestion_ratio() * 10.0).min(10.0)))
        .unwrap_or(NEUTRAL_TRAFFIC_SCORE)
}

/// Mean congestion percentage over segments with a positive free-flow speed.
pub fn overall_congestion(snapshot: &TrafficSnapshot) -> f64 {
    mean(
        snapshot
            .flow
            .iter()
            .filter(|s| s.free_flow_speed > 0.0)
            .map(|s| (1.0 - s.congestion_ratio()) * 100.0),
    )
    .map(|pct| pct.clamp(0.0, 100.0))
    .unwrap_or(NEUTRAL_CONGESTION_PCT)
}

/// Mean observed speed in km/h.
pub fn average_speed(snapshot: &TrafficSnapshot) -> f64 {
    mean(snapshot.flow.iter().map(|s| s.current_speed)).unwrap_or(NEUTRAL_SPEED_KMH)
}

// ── TrafficSummary ────────────────────────────────────────────────────────────

/// The dashboard metric row for one snapshot.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficSummary {
    pub traffic_score:    f64,
    pub congestion_pct:   f64,
    pub average_speed:    f64,
    pub active_incidents: usize,
}

impl TrafficSummary {
    pub fn from_snapshot(snapshot: &TrafficSnapshot) -> Self {
        if snapshot.flow.is_empty() {
            log::warn!("traffic snapshot has no flow segments; reporting neutral conditions");
        }
        Self {
            traffic_score:    traffic_score(snapshot),
            congestion_pct:   overall_congestion(snapshot),
            average_speed:    average_speed(snapshot),
            active_incidents: snapshot.incidents.len(),
        }
    }
}

// ── Local status ──────────────────────────────────────────────────────────────

/// Coarse congestion label for the roads around one site.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrafficStatus {
    Light,
    Moderate,
    Heavy,
    /// No flow segment reaches within the query radius.
    Unknown,
}

impl TrafficStatus {
    /// Upper bounds (exclusive) of the `Light` and `Moderate` bands, percent.
    pub const LIGHT_BELOW_PCT: f64 = 30.0;
    pub const MODERATE_BELOW_PCT: f64 = 60.0;

    pub fn from_congestion_pct(pct: f64) -> Self {
        if pct < Self::LIGHT_BELOW_PCT {
            TrafficStatus::Light
        } else if pct < Self::MODERATE_BELOW_PCT {
            TrafficStatus::Moderate
        } else {
            TrafficStatus::Heavy
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrafficStatus::Light    => "Light",
            TrafficStatus::Moderate => "Moderate",
            TrafficStatus::Heavy    => "Heavy",
            TrafficStatus::Unknown  => "Unknown",
        }
    }
}

impl std::fmt::Display for TrafficStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

/// Classify congestion on the segments that pass within `radius_m` of
/// `location`.
///
/// Unlike the snapshot-wide metrics there is no neutral fallback here: a
/// site no segment reaches is reported as [`TrafficStatus::Unknown`].
pub fn local_status(snapshot: &TrafficSnapshot, location: Coordinate, radius_m: f64) -> TrafficStatus {
    let nearby = mean(
        snapshot
            .flow
            .iter()
            .filter(|s| s.free_flow_speed > 0.0)
            .filter(|s| s.nearest_vertex_m(location).is_some_and(|d| d <= radius_m))
            .map(|s| (1.0 - s.congestion_ratio()) * 100.0),
    );
    match nearby {
        Some(pct) => TrafficStatus::from_congestion_pct(pct.clamp(0.0, 100.0)),
        None => TrafficStatus::Unknown,
    }
}
