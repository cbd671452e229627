//! campus — end-to-end run of the EcoMove site recommender.
//!
//! Fetches a seeded synthetic traffic snapshot around the Tabuk University
//! main gate, prints the dashboard metrics and per-site traffic status,
//! recommends new pickup points, and summarizes an embedded ride log.
//!
//! ```text
//! RUST_LOG=debug cargo run -p campus -- [config.json]
//! ```
//!
//! The optional JSON file may set any of `radius_m`, `recommend`, `weights`
//! and `traffic`; missing fields keep their defaults.

mod sites;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;

use em_recommend::{RecommendConfig, Recommender, ScoringWeights};
use em_schedule::{load_rides_reader, route_type_distribution, site_utilization, summarize, weekly_trends};
use em_traffic::{SyntheticConfig, SyntheticProvider, TrafficProvider, TrafficSummary, local_status};

use sites::{CAMPUS_CENTER, campus_sites};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Radius used for the per-site traffic status column.
const STATUS_RADIUS_M: f64 = 150.0;

// ── Ride log ──────────────────────────────────────────────────────────────────

// One week of rides.  2024-03-03 is a Sunday (first day of the campus week).
const RIDES_CSV: &str = "\
timestamp,passenger_count,route_type,eco_impact,destination,capacity\n\
2024-03-03 07:45:00,13,regular,3.2,Main Gate,15\n\
2024-03-03 08:10:00,15,regular,3.8,College of Engineering,15\n\
2024-03-03 12:30:00,6,on_demand,1.1,University Library,8\n\
2024-03-04 07:50:00,14,regular,3.5,Main Gate,15\n\
2024-03-04 08:15:00,11,regular,2.7,College of Medicine,15\n\
2024-03-04 16:40:00,9,regular,2.2,Student Housing,15\n\
2024-03-05 08:05:00,15,regular,3.8,College of Engineering,15\n\
2024-03-05 21:20:00,3,on_demand,0.6,Student Housing,4\n\
2024-03-06 07:55:00,12,regular,3.0,Main Gate,15\n\
2024-03-06 13:10:00,5,on_demand,0.9,College of Medicine,8\n\
2024-03-07 08:00:00,10,regular,2.5,University Library,15\n\
2024-03-07 17:30:00,13,regular,3.2,Student Housing,15\n\
";

// ── Config file ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(default)]
struct DemoConfig {
    radius_m:  f64,
    recommend: RecommendConfig,
    weights:   ScoringWeights,
    traffic:   SyntheticConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            radius_m:  500.0,
            recommend: RecommendConfig::default(),
            weights:   ScoringWeights::default(),
            traffic:   SyntheticConfig::default(),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(cfg)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    pretty_env_logger::init();

    let arg = std::env::args().nth(1);
    let cfg = load_config(arg.as_deref().map(Path::new))?;

    println!("=== campus — EcoMove site recommender ===");
    println!(
        "Centre: {CAMPUS_CENTER}  |  Radius: {} m  |  Seed: {}",
        cfg.radius_m, cfg.traffic.seed
    );
    println!();

    // 1. Existing sites.
    let existing = campus_sites();
    println!(
        "Existing sites: {}  (network utilization {:.0} %)",
        existing.len(),
        site_utilization(&existing) * 100.0
    );

    // 2. Traffic snapshot.
    let provider = SyntheticProvider::new(cfg.traffic.clone());
    let snapshot = provider.fetch_snapshot(CAMPUS_CENTER, cfg.radius_m)?;
    let summary = TrafficSummary::from_snapshot(&snapshot);
    println!(
        "Traffic: congestion {:.1} %  |  avg speed {:.1} km/h  |  score {:.1}/10  |  incidents {}",
        summary.congestion_pct, summary.average_speed, summary.traffic_score, summary.active_incidents
    );
    println!();

    println!("{:<24} {:>9} {:>8} {:<10}", "Site", "Capacity", "Util.", "Traffic");
    println!("{}", "-".repeat(54));
    for site in &existing {
        println!(
            "{:<24} {:>4}/{:<4} {:>7.0}% {:<10}{}",
            site.name,
            site.current_demand,
            site.capacity,
            site.utilization() * 100.0,
            local_status(&snapshot, site.location, STATUS_RADIUS_M),
            if site.is_oversubscribed() { " (over capacity)" } else { "" },
        );
    }
    println!();

    // 3. Recommendations.
    let recommender = Recommender::new(cfg.recommend.clone(), cfg.weights.clone());
    let t0 = Instant::now();
    let recs = recommender.recommend(CAMPUS_CENTER, cfg.radius_m, &snapshot, &existing)?;
    let elapsed = t0.elapsed();

    println!(
        "Recommended sites: {} of top {} in {:.1} ms",
        recs.len(),
        cfg.recommend.top_k,
        elapsed.as_secs_f64() * 1_000.0
    );
    println!("{:<4} {:<24} {:>6}  {}", "#", "Location", "Score", "Reasons");
    println!("{}", "-".repeat(72));
    for (rank, rec) in recs.iter().enumerate() {
        let reasons: Vec<String> = rec.reasons.iter().map(ToString::to_string).collect();
        println!(
            "{:<4} {:<24} {:>6.2}  {}",
            rank + 1,
            rec.location.to_string(),
            rec.score,
            reasons.join("; ")
        );
    }
    println!();

    // 4. Schedule analytics.
    let rides = load_rides_reader(Cursor::new(RIDES_CSV))?;
    let sched = summarize(&rides);
    println!(
        "Ride log: {} rides, capacity utilization {:.0} %",
        rides.len(),
        sched.capacity_utilization * 100.0
    );

    println!("{:<6} {:>10}", "Hour", "Avg pax");
    for (hour, mean) in &sched.hourly_demand {
        println!("{:02}:00  {:>10.1}", hour, mean);
    }
    println!();

    println!("{:<24} {:>10}", "Destination", "Passengers");
    for (dest, pax) in &sched.route_popularity {
        println!("{:<24} {:>10}", dest, pax);
    }
    println!();

    println!("{:<6} {:>6} {:>9} {:>10}", "Day", "Rides", "Avg pax", "CO₂ (kg)");
    for day in weekly_trends(&rides).values() {
        println!(
            "{:<6} {:>6} {:>9.1} {:>10.1}",
            day.weekday.to_string(),
            day.rides,
            day.mean_passengers,
            day.eco_impact
        );
    }
    println!();

    for (route_type, count) in route_type_distribution(&rides) {
        println!("{route_type:<10} {count} rides");
    }

    Ok(())
}
