//! Traffic-subsystem error type.

use thiserror::Error;

use em_core::EmError;

/// Errors produced by `em-traffic`.
///
/// Summaries never fail; only providers and snapshot construction do.
#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("traffic provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Core(#[from] EmError),
}

pub type TrafficResult<T> = Result<T, TrafficError>;
