//! Core error type.
//!
//! Only two conditions are treated as failures anywhere in the engine: a
//! coordinate outside the WGS-84 ranges, and a non-positive grid parameter.
//! Everything else (empty snapshots, zero capacity) has a defined fallback
//! value.  Sub-crates wrap `EmError` as one variant of their own enums.

use thiserror::Error;

/// The top-level error type for `em-core` and a common base for sub-crates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmError {
    #[error("invalid coordinate ({lat}, {lon}): expected -90 ≤ lat ≤ 90 and -180 ≤ lon ≤ 180")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Shorthand result type for all `em-*` crates.
pub type EmResult<T> = Result<T, EmError>;
