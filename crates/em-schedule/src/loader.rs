//! CSV loaders for ride records and existing sites.
//!
//! # Rides
//!
//! ```csv
//! timestamp,passenger_count,route_type,eco_impact,destination,capacity
//! 2024-03-03 08:15:00,12,regular,3.4,Main Gate,15
//! 2024-03-03T09:40:00,3,on_demand,0.9,College of Medicine,4
//! ```
//!
//! `timestamp` is naive local time, either `YYYY-MM-DD HH:MM[:SS]` or the
//! ISO `T`-separated form.  `route_type` is parsed by
//! [`RouteType::from_str`](crate::RouteType).
//!
//! # Sites
//!
//! ```csv
//! name,lat,lon,capacity,current_demand
//! Main Gate,28.3835,36.4868,15,15
//! ```
//!
//! Coordinates are range-checked and `capacity` must be positive;
//! `current_demand` above capacity is accepted.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use em_core::{Coordinate, ExistingSite};

use crate::{RideRecord, RouteType, ScheduleError, ScheduleResult};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RideRow {
    timestamp:       String,
    passenger_count: u32,
    route_type:      String,
    eco_impact:      f64,
    destination:     String,
    capacity:        u32,
}

#[derive(Deserialize)]
struct SiteRow {
    name:           String,
    lat:            f64,
    lon:            f64,
    capacity:       u32,
    current_demand: u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load ride records from a CSV file, in file order.
pub fn load_rides_csv(path: &Path) -> ScheduleResult<Vec<RideRecord>> {
    let file = std::fs::File::open(path)?;
    let rides = load_rides_reader(file)?;
    log::debug!("loaded {} rides from {}", rides.len(), path.display());
    Ok(rides)
}

/// Like [`load_rides_csv`] but accepts any `Read` source.
pub fn load_rides_reader<R: Read>(reader: R) -> ScheduleResult<Vec<RideRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<RideRow>()
        .map(|result| {
            let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
            Ok(RideRecord {
                timestamp:       parse_timestamp(&row.timestamp)?,
                passenger_count: row.passenger_count,
                route_type:      row.route_type.parse::<RouteType>()?,
                eco_impact:      row.eco_impact,
                destination:     row.destination,
                capacity:        row.capacity,
            })
        })
        .collect()
}

/// Load existing sites from a CSV file, in file order.
pub fn load_sites_csv(path: &Path) -> ScheduleResult<Vec<ExistingSite>> {
    let file = std::fs::File::open(path)?;
    let sites = load_sites_reader(file)?;
    log::debug!("loaded {} sites from {}", sites.len(), path.display());
    Ok(sites)
}

/// Like [`load_sites_csv`] but accepts any `Read` source.
pub fn load_sites_reader<R: Read>(reader: R) -> ScheduleResult<Vec<ExistingSite>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader
        .deserialize::<SiteRow>()
        .map(|result| {
            let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
            if row.capacity == 0 {
                return Err(ScheduleError::Parse(format!("site {:?} has zero capacity", row.name)));
            }
            let location = Coordinate::new(row.lat, row.lon)?;
            Ok(ExistingSite::new(row.name, location, row.capacity, row.current_demand))
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_timestamp(s: &str) -> ScheduleResult<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| {
            ScheduleError::Parse(format!(
                "invalid timestamp {s:?}: expected \"YYYY-MM-DD HH:MM[:SS]\""
            ))
        })
}
