//! Existing pickup/drop-off sites.

use crate::Coordinate;

/// A pickup/drop-off point already in service.
///
/// `current_demand` may exceed `capacity`; an over-subscribed site is a
/// normal observable state and is never rejected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExistingSite {
    pub name:           String,
    pub location:       Coordinate,
    pub capacity:       u32,
    pub current_demand: u32,
}

impl ExistingSite {
    pub fn new(name: impl Into<String>, location: Coordinate, capacity: u32, current_demand: u32) -> Self {
        Self { name: name.into(), location, capacity, current_demand }
    }

    /// Demand over capacity.  Unclamped: values above `1.0` mean the site is
    /// over-subscribed.  `0.0` for a zero-capacity site.
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.current_demand as f64 / self.capacity as f64
        }
    }

    #[inline]
    pub fn is_oversubscribed(&self) -> bool {
        self.current_demand > self.capacity
    }
}
