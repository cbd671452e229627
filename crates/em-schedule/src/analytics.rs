//! Demand and capacity aggregation over ride records.
//!
//! All functions are pure reductions.  Empty input yields empty maps and
//! zero ratios, never an error.

use std::collections::BTreeMap;

use chrono::{Datelike, Timelike, Weekday};

use em_core::ExistingSite;

use crate::{RideRecord, RouteType};

// ── summarize ─────────────────────────────────────────────────────────────────

/// The schedule-analysis page's headline numbers.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleSummary {
    /// Hour of day (0–23) → mean passengers per ride.  Hours with no rides
    /// are absent.
    pub hourly_demand: BTreeMap<u32, f64>,
    /// Destination → total passengers.
    pub route_popularity: BTreeMap<String, u64>,
    /// Total passengers over total capacity, in `[0, 1]`.
    pub capacity_utilization: f64,
}

/// Aggregate `rides` into hourly demand, destination popularity and capacity
/// utilization.
///
/// Utilization is `0` when total capacity is `0`, and clamped to `1.0` when
/// rides were over-subscribed in aggregate.
pub fn summarize(rides: &[RideRecord]) -> ScheduleSummary {
    let mut by_hour: BTreeMap<u32, (u64, usize)> = BTreeMap::new();
    let mut route_popularity: BTreeMap<String, u64> = BTreeMap::new();
    let mut passengers: u64 = 0;
    let mut capacity: u64 = 0;

    for r in rides {
        let slot = by_hour.entry(r.timestamp.hour()).or_insert((0, 0));
        slot.0 += r.passenger_count as u64;
        slot.1 += 1;

        *route_popularity.entry(r.destination.clone()).or_default() += r.passenger_count as u64;

        passengers += r.passenger_count as u64;
        capacity += r.capacity as u64;
    }

    let hourly_demand = by_hour
        .into_iter()
        .map(|(h, (sum, n))| (h, sum as f64 / n as f64))
        .collect();

    let capacity_utilization = if capacity == 0 {
        0.0
    } else {
        (passengers as f64 / capacity as f64).min(1.0)
    };

    log::debug!(
        "summarized {} rides: {passengers}/{capacity} seats filled",
        rides.len()
    );

    ScheduleSummary { hourly_demand, route_popularity, capacity_utilization }
}

// ── Weekly trends ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayTrend {
    pub weekday:         Weekday,
    pub rides:           usize,
    pub mean_passengers: f64,
    /// Summed eco impact, kg CO₂.
    pub eco_impact:      f64,
}

/// Per-weekday mean passengers and summed eco impact, keyed by days from
/// Monday (`0` = Monday … `6` = Sunday).  Days with no rides are absent.
pub fn weekly_trends(rides: &[RideRecord]) -> BTreeMap<u32, DayTrend> {
    let mut acc: BTreeMap<u32, (Weekday, u64, usize, f64)> = BTreeMap::new();
    for r in rides {
        let day = r.timestamp.weekday();
        let slot = acc.entry(day.num_days_from_monday()).or_insert((day, 0, 0, 0.0));
        slot.1 += r.passenger_count as u64;
        slot.2 += 1;
        slot.3 += r.eco_impact;
    }
    acc.into_iter()
        .map(|(k, (weekday, sum, n, eco))| {
            (k, DayTrend { weekday, rides: n, mean_passengers: sum as f64 / n as f64, eco_impact: eco })
        })
        .collect()
}

// ── Distributions & totals ────────────────────────────────────────────────────

/// Number of rides per [`RouteType`].  Types with no rides are absent.
pub fn route_type_distribution(rides: &[RideRecord]) -> BTreeMap<RouteType, usize> {
    let mut dist = BTreeMap::new();
    for r in rides {
        *dist.entry(r.route_type).or_default() += 1;
    }
    dist
}

/// Total eco impact over all rides, kg CO₂.
pub fn total_eco_impact(rides: &[RideRecord]) -> f64 {
    rides.iter().map(|r| r.eco_impact).sum()
}

/// Aggregate demand over capacity across existing sites.
///
/// Unlike [`summarize`] this is not clamped, so network-wide
/// over-subscription shows up as a value above `1.0`.  `0` when the sites
/// have no capacity.
pub fn site_utilization(sites: &[ExistingSite]) -> f64 {
    let demand: u64 = sites.iter().map(|s| s.current_demand as u64).sum();
    let capacity: u64 = sites.iter().map(|s| s.capacity as u64).sum();
    if capacity == 0 {
        0.0
    } else {
        demand as f64 / capacity as f64
    }
}
