//! `em-schedule` — ride records and the demand/capacity metrics derived from
//! them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`record`]    | `RideRecord`, `RouteType`                                 |
//! | [`analytics`] | `summarize`, `ScheduleSummary`, `weekly_trends`, `route_type_distribution`, `site_utilization` |
//! | [`loader`]    | `load_rides_csv`, `load_sites_csv` and their `Read` variants |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Grouping model
//!
//! Timestamps are naive (no time zone): they are bucketed by the wall-clock
//! hour or weekday in whatever zone they were recorded.  Hourly buckets mix
//! all dates together:
//!
//! ```text
//! hourly_demand[h]        = mean(passenger_count | timestamp.hour() == h)
//! route_popularity[dest]  = Σ passenger_count     | destination == dest
//! capacity_utilization    = Σ passenger_count / Σ capacity   (0 if Σ capacity = 0)
//! ```
//!
//! This crate does not validate records; the producer is responsible.

pub mod analytics;
pub mod error;
pub mod loader;
pub mod record;

#[cfg(test)]
mod tests;

pub use analytics::{
    DayTrend, ScheduleSummary, route_type_distribution, site_utilization, summarize,
    total_eco_impact, weekly_trends,
};
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_rides_csv, load_rides_reader, load_sites_csv, load_sites_reader};
pub use record::{RideRecord, RouteType};
