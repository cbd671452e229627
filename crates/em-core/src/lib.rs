//! `em-core` — foundational types for the EcoMove site recommender.
//!
//! This crate is a dependency of every other `em-*` crate.  It has no
//! `em-*` dependencies and only `thiserror` (plus optional `serde`) from
//! outside.
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`geo`]   | `Coordinate`, haversine `distance`, `degrees_per_meter`   |
//! | [`site`]  | `ExistingSite`                                            |
//! | [`error`] | `EmError`, `EmResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod site;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EmError, EmResult};
pub use geo::{Coordinate, EARTH_RADIUS_M, degrees_per_meter, distance, wrap_longitude};
pub use site::ExistingSite;
