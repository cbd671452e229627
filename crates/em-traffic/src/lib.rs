//! `em-traffic` — traffic snapshots and the conditions derived from them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`snapshot`] | `TrafficSnapshot`, `TrafficFlowSegment`, `TrafficIncident`  |
//! | [`summary`]  | `traffic_score`, `overall_congestion`, `average_speed`, `TrafficSummary`, `local_status` |
//! | [`index`]    | `SnapshotIndex` (R-tree over segment vertices and incidents) |
//! | [`provider`] | `TrafficProvider` trait, `StaticProvider`, `SyntheticProvider` |
//! | [`error`]    | `TrafficError`, `TrafficResult<T>`                          |
//!
//! # Fallbacks
//!
//! An empty snapshot is "typical conditions", not an error.  Every summary
//! has a neutral constant for the no-data case so that the ranking pipeline
//! never sees a missing value.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod index;
pub mod provider;
pub mod snapshot;
pub mod summary;


pub use error::{TrafficError, TrafficResult};
pub use index::SnapshotIndex;
pub use provider::{StaticProvider, SyntheticConfig, SyntheticProvider, TrafficProvider};
pub use snapshot::{IncidentKind, TrafficFlowSegment, TrafficIncident, TrafficSnapshot};
pub use summary::{
    TrafficStatus, TrafficSummary, average_speed, local_status, overall_congestion, traffic_score,
};
