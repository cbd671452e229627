//! Point-in-time traffic data for one bounding area.
//!
//! A snapshot is produced by a [`TrafficProvider`](crate::TrafficProvider)
//! and never mutated afterwards.  It carries no timestamp or staleness
//! tracking; the provider owns refresh cadence.

use em_core::Coordinate;

// ── Flow ─────────────────────────────────────────────────────────────────────

/// One road segment reported by the flow feed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficFlowSegment {
    /// Polyline vertices in travel order.
    pub coordinates: Vec<Coordinate>,
    /// Observed speed, km/h.
    pub current_speed: f64,
    /// Typical uncongested speed, km/h.
    pub free_flow_speed: f64,
}

impl TrafficFlowSegment {
    pub fn new(coordinates: Vec<Coordinate>, current_speed: f64, free_flow_speed: f64) -> Self {
        Self { coordinates, current_speed, free_flow_speed }
    }

    /// `current_speed / free_flow_speed`, clamped to `[0, ∞)`.
    ///
    /// Values below `1.0` mean slower than typical.  A zero (or negative)
    /// free-flow speed yields `0.0` rather than a division fault.
    pub fn congestion_ratio(&self) -> f64 {
        if self.free_flow_speed > 0.0 {
            (self.current_speed / self.free_flow_speed).max(0.0)
        } else {
            0.0
        }
    }

    /// Distance in metres from `point` to the closest vertex, or `None` for a
    /// segment with no vertices.
    pub fn nearest_vertex_m(&self, point: Coordinate) -> Option<f64> {
        self.coordinates
            .iter()
            .map(|&v| v.distance_m(point))
            .min_by(f64::total_cmp)
    }
}

// ── Incidents ─────────────────────────────────────────────────────────────────

/// Incident category as reported by the incident feed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IncidentKind {
    Accident,
    Construction,
    Congestion,
    Other,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficIncident {
    pub kind:        IncidentKind,
    pub location:    Coordinate,
    pub description: String,
}

impl TrafficIncident {
    pub fn new(kind: IncidentKind, location: Coordinate, description: impl Into<String>) -> Self {
        Self { kind, location, description: description.into() }
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Flow segments and incidents for one query at one instant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficSnapshot {
    pub flow:      Vec<TrafficFlowSegment>,
    pub incidents: Vec<TrafficIncident>,
}

impl TrafficSnapshot {
    pub fn new(flow: Vec<TrafficFlowSegment>, incidents: Vec<TrafficIncident>) -> Self {
        Self { flow, incidents }
    }

    /// A snapshot with no flow and no incidents (provider returned nothing).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.flow.is_empty() && self.incidents.is_empty()
    }

    /// `true` if any incident of `kind` is present anywhere in the snapshot.
    pub fn has_incident_kind(&self, kind: IncidentKind) -> bool {
        self.incidents.iter().any(|i| i.kind == kind)
    }
}
