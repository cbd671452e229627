//! The unit of schedule analytics: one completed or scheduled ride.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::ScheduleError;

/// How a ride was dispatched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteType {
    /// Fixed-timetable shuttle.
    Regular,
    /// Requested by a rider.
    OnDemand,
}

impl RouteType {
    pub fn label(self) -> &'static str {
        match self {
            RouteType::Regular  => "regular",
            RouteType::OnDemand => "on_demand",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for RouteType {
    type Err = ScheduleError;

    /// Accepts `regular`, `on_demand`, `on-demand` and `ondemand`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(RouteType::Regular),
            "on_demand" | "on-demand" | "ondemand" => Ok(RouteType::OnDemand),
            other => Err(ScheduleError::Parse(format!(
                "invalid route_type {other:?}: expected \"regular\" or \"on_demand\""
            ))),
        }
    }
}

/// One ride.
///
/// `timestamp` is time-zone naive.  `capacity` is the number of seats the
/// ride offered; `passenger_count` may exceed it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideRecord {
    pub timestamp:       NaiveDateTime,
    pub passenger_count: u32,
    pub route_type:      RouteType,
    /// CO₂ saved by this ride, kg.
    pub eco_impact:      f64,
    /// Name of the site the ride served.
    pub destination:     String,
    pub capacity:        u32,
}
