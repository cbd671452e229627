//! R-tree index over a snapshot's segment vertices and incident locations.
//!
//! Scoring a candidate grid asks the same two radius questions hundreds of
//! times against one snapshot: "which segments have a vertex within `r`?"
//! and "which incidents lie within `r`?".  `SnapshotIndex` answers both by
//! an envelope query in degree space followed by an exact haversine filter,
//! so results are identical to a linear scan.
//!
//! # Envelope sizing
//!
//! The query box is `radius_m` converted with
//! [`degrees_per_meter`](em_core::degrees_per_meter), using the longitude step
//! at the box edge nearest the pole, then padded by [`ENVELOPE_PAD`].  A
//! great-circle distance is never shorter than its meridional component, so
//! the latitude half-extent is exact; the padding absorbs the small-angle
//! approximation on longitude.  A box that crosses the antimeridian is
//! queried a second time shifted by 360°, so points on the far side of the
//! seam are found too.

use std::collections::BTreeMap;

use rstar::{AABB, RTree, RTreeObject};

use em_core::{Coordinate, degrees_per_meter};

use crate::TrafficSnapshot;

/// Multiplier applied to the envelope half-extent.
pub const ENVELOPE_PAD: f64 = 1.5;

/// Highest latitude the envelope is widened for; keeps `cos` away from zero.
const MAX_ENVELOPE_LAT: f64 = 89.0;

// ── R-tree entries ────────────────────────────────────────────────────────────

/// A segment vertex: `[lat, lon]` plus the owning segment's index.
#[derive(Clone)]
struct VertexEntry {
    point:   [f64; 2],
    segment: u32,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// An incident location plus its index in `snapshot.incidents`.
#[derive(Clone)]
struct IncidentEntry {
    point:    [f64; 2],
    incident: u32,
}

impl RTreeObject for IncidentEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

#[inline]
fn to_point(c: Coordinate) -> [f64; 2] {
    [c.lat, c.lon]
}

#[inline]
fn to_coord(p: [f64; 2]) -> Coordinate {
    Coordinate { lat: p[0], lon: p[1] }
}

/// One envelope around `center`, plus its 360°-shifted twin when the box
/// spills over ±180°.
fn query_envelopes(center: Coordinate, radius_m: f64) -> Vec<AABB<[f64; 2]>> {
    let (lat_step, _) = degrees_per_meter(center.lat);
    let half_lat = radius_m * lat_step * ENVELOPE_PAD;
    let edge_lat = (center.lat.abs() + half_lat).min(MAX_ENVELOPE_LAT);
    let (_, lon_step) = degrees_per_meter(edge_lat);
    let half_lon = (radius_m * lon_step * ENVELOPE_PAD).min(180.0);

    let (lo, hi) = (center.lon - half_lon, center.lon + half_lon);
    let boxed = |shift: f64| {
        AABB::from_corners(
            [center.lat - half_lat, lo + shift],
            [center.lat + half_lat, hi + shift],
        )
    };

    let mut envelopes = vec![boxed(0.0)];
    if hi > 180.0 {
        envelopes.push(boxed(-360.0));
    }
    if lo < -180.0 {
        envelopes.push(boxed(360.0));
    }
    envelopes
}

// ── SnapshotIndex ─────────────────────────────────────────────────────────────

/// Spatial index over one [`TrafficSnapshot`].
///
/// Built once per recommendation run and shared read-only by every
/// candidate; it is `Send + Sync`.
pub struct SnapshotIndex {
    vertices:  RTree<VertexEntry>,
    incidents: RTree<IncidentEntry>,
}

impl SnapshotIndex {
    /// Bulk-load both trees.  O((V + I) log(V + I)).
    pub fn build(snapshot: &TrafficSnapshot) -> Self {
        let vertices: Vec<VertexEntry> = snapshot
            .flow
            .iter()
            .enumerate()
            .flat_map(|(i, seg)| {
                seg.coordinates
                    .iter()
                    .map(move |&c| VertexEntry { point: to_point(c), segment: i as u32 })
            })
            .collect();

        let incidents: Vec<IncidentEntry> = snapshot
            .incidents
            .iter()
            .enumerate()
            .map(|(i, inc)| IncidentEntry { point: to_point(inc.location), incident: i as u32 })
            .collect();

        log::debug!(
            "indexed snapshot: {} segments / {} vertices, {} incidents",
            snapshot.flow.len(),
            vertices.len(),
            incidents.len()
        );

        Self {
            vertices:  RTree::bulk_load(vertices),
            incidents: RTree::bulk_load(incidents),
        }
    }

    /// Segments whose closest vertex is within `radius_m` (inclusive) of
    /// `point`, as `(segment_index, nearest_vertex_m)` in ascending segment
    /// order.
    pub fn segments_within(&self, point: Coordinate, radius_m: f64) -> Vec<(usize, f64)> {
        let mut nearest: BTreeMap<u32, f64> = BTreeMap::new();
        for envelope in query_envelopes(point, radius_m) {
            for v in self.vertices.locate_in_envelope(&envelope) {
                let d = to_coord(v.point).distance_m(point);
                if d <= radius_m {
                    nearest
                        .entry(v.segment)
                        .and_modify(|best| *best = best.min(d))
                        .or_insert(d);
                }
            }
        }
        nearest.into_iter().map(|(i, d)| (i as usize, d)).collect()
    }

    /// Indices of incidents within `radius_m` (inclusive) of `point`, in
    /// ascending order.
    pub fn incidents_within(&self, point: Coordinate, radius_m: f64) -> Vec<usize> {
        let mut hits: Vec<usize> = query_envelopes(point, radius_m)
            .iter()
            .flat_map(|envelope| self.incidents.locate_in_envelope(envelope))
            .filter(|e| to_coord(e.point).distance_m(point) <= radius_m)
            .map(|e| e.incident as usize)
            .collect();
        // An envelope wider than the globe can report a point twice.
        hits.sort_unstable();
        hits.dedup();
        hits
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.size()
    }

    pub fn incident_count(&self) -> usize {
        self.incidents.size()
    }
}
