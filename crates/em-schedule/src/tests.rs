//! Unit tests for em-schedule.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{RideRecord, RouteType};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 2024-03-04 is a Monday.
fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

fn ride(ts: NaiveDateTime, passengers: u32, dest: &str, capacity: u32) -> RideRecord {
    RideRecord {
        timestamp:       ts,
        passenger_count: passengers,
        route_type:      RouteType::Regular,
        eco_impact:      passengers as f64 * 0.25,
        destination:     dest.to_string(),
        capacity,
    }
}

fn week_of_rides() -> Vec<RideRecord> {
    vec![
        ride(at(4, 8, 0), 10, "Main Gate", 15),
        ride(at(4, 8, 30), 14, "College of Engineering", 15),
        ride(at(5, 8, 10), 6, "Main Gate", 15),
        ride(at(5, 13, 0), 4, "University Library", 10),
        RideRecord { route_type: RouteType::OnDemand, ..ride(at(9, 22, 45), 2, "Student Housing", 4) },
    ]
}

// ── summarize ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod summarize {
    use super::*;
    use crate::summarize;

    #[test]
    fn empty_input() {
        let s = summarize(&[]);
        assert_eq!(s.capacity_utilization, 0.0);
        assert!(s.hourly_demand.is_empty());
        assert!(s.route_popularity.is_empty());
    }

    #[test]
    fn hourly_demand_mixes_dates() {
        let s = summarize(&week_of_rides());
        // Hour 8 across Monday and Tuesday: (10 + 14 + 6) / 3
        assert_eq!(s.hourly_demand[&8], 10.0);
        assert_eq!(s.hourly_demand[&13], 4.0);
        assert_eq!(s.hourly_demand[&22], 2.0);
        assert_eq!(s.hourly_demand.len(), 3);
    }

    #[test]
    fn route_popularity_sums_passengers() {
        let s = summarize(&week_of_rides());
        assert_eq!(s.route_popularity["Main Gate"], 16);
        assert_eq!(s.route_popularity["College of Engineering"], 14);
        assert_eq!(s.route_popularity["Student Housing"], 2);
        assert_eq!(s.route_popularity.len(), 4);
    }

    #[test]
    fn utilization_is_passengers_over_seats() {
        let s = summarize(&week_of_rides());
        // 36 passengers / 59 seats
        assert!((s.capacity_utilization - 36.0 / 59.0).abs() < 1e-12);
    }

    #[test]
    fn zero_capacity_gives_zero_utilization() {
        let s = summarize(&[ride(at(4, 9, 0), 3, "Main Gate", 0)]);
        assert_eq!(s.capacity_utilization, 0.0);
        assert_eq!(s.route_popularity["Main Gate"], 3);
    }

    #[test]
    fn oversubscription_clamps_to_one() {
        let s = summarize(&[ride(at(4, 9, 0), 20, "Main Gate", 15)]);
        assert_eq!(s.capacity_utilization, 1.0);
    }
}

// ── Trends & distributions ────────────────────────────────────────────────────

#[cfg(test)]
mod trends {
    use chrono::Weekday;

    use em_core::{Coordinate, ExistingSite};

    use super::*;
    use crate::{route_type_distribution, site_utilization, total_eco_impact, weekly_trends};

    #[test]
    fn weekly_trends_by_weekday() {
        let t = weekly_trends(&week_of_rides());
        assert_eq!(t.len(), 3);

        let monday = &t[&0];
        assert_eq!(monday.weekday, Weekday::Mon);
        assert_eq!(monday.rides, 2);
        assert_eq!(monday.mean_passengers, 12.0);
        assert_eq!(monday.eco_impact, 6.0);

        assert_eq!(t[&1].weekday, Weekday::Tue);
        assert_eq!(t[&1].mean_passengers, 5.0);

        assert_eq!(t[&5].weekday, Weekday::Sat);
        assert!(!t.contains_key(&6));
    }

    #[test]
    fn route_types_counted() {
        let d = route_type_distribution(&week_of_rides());
        assert_eq!(d[&RouteType::Regular], 4);
        assert_eq!(d[&RouteType::OnDemand], 1);
        assert!(route_type_distribution(&[]).is_empty());
    }

    #[test]
    fn eco_impact_total() {
        assert_eq!(total_eco_impact(&week_of_rides()), 9.0);
        assert_eq!(total_eco_impact(&[]), 0.0);
    }

    #[test]
    fn site_utilization_shows_oversubscription() {
        let gate = Coordinate { lat: 28.3835, lon: 36.4868 };
        let sites = vec![
            ExistingSite::new("Main Gate", gate, 15, 15),
            ExistingSite::new("College of Medicine", gate, 20, 25),
        ];
        assert!((site_utilization(&sites) - 40.0 / 35.0).abs() < 1e-12);
        assert_eq!(site_utilization(&[]), 0.0);
    }
}

// ── RouteType ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route_type {
    use crate::RouteType;

    #[test]
    fn parse_variants() {
        assert_eq!("regular".parse::<RouteType>().unwrap(), RouteType::Regular);
        assert_eq!(" Regular ".parse::<RouteType>().unwrap(), RouteType::Regular);
        assert_eq!("on_demand".parse::<RouteType>().unwrap(), RouteType::OnDemand);
        assert_eq!("On-Demand".parse::<RouteType>().unwrap(), RouteType::OnDemand);
        assert!("shuttle".parse::<RouteType>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for t in [RouteType::Regular, RouteType::OnDemand] {
            assert_eq!(t.to_string().parse::<RouteType>().unwrap(), t);
        }
    }
}

// ── CSV loaders ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use chrono::Timelike;

    use em_core::EmError;

    use crate::{RouteType, ScheduleError, load_rides_csv, load_rides_reader, load_sites_csv, load_sites_reader};

    const RIDES_CSV: &str = "\
timestamp,passenger_count,route_type,eco_impact,destination,capacity
2024-03-04 08:15:00,12,regular,3.4,Main Gate,15
2024-03-04T09:40:00,3,on_demand,0.9,College of Medicine,4
2024-03-05 17:05,7, regular ,1.75,Student Housing,10
";

    const SITES_CSV: &str = "\
name,lat,lon,capacity,current_demand
Main Gate,28.3835,36.4868,15,15
College of Medicine,28.3830,36.4863,20,25
";

    #[test]
    fn loads_rides() {
        let rides = load_rides_reader(Cursor::new(RIDES_CSV)).unwrap();
        assert_eq!(rides.len(), 3);
        assert_eq!(rides[0].timestamp.hour(), 8);
        assert_eq!(rides[0].passenger_count, 12);
        assert_eq!(rides[0].destination, "Main Gate");
        assert_eq!(rides[1].route_type, RouteType::OnDemand);
        assert_eq!(rides[1].timestamp.minute(), 40);
        assert_eq!(rides[2].route_type, RouteType::Regular);
        assert_eq!(rides[2].capacity, 10);
    }

    #[test]
    fn empty_rides_file() {
        let rides = load_rides_reader(Cursor::new(
            "timestamp,passenger_count,route_type,eco_impact,destination,capacity\n",
        ))
        .unwrap();
        assert!(rides.is_empty());
    }

    #[test]
    fn bad_timestamp_is_parse_error() {
        let csv = "timestamp,passenger_count,route_type,eco_impact,destination,capacity\n\
                   yesterday,1,regular,0.1,Main Gate,4\n";
        assert!(matches!(load_rides_reader(Cursor::new(csv)), Err(ScheduleError::Parse(_))));
    }

    #[test]
    fn bad_route_type_is_parse_error() {
        let csv = "timestamp,passenger_count,route_type,eco_impact,destination,capacity\n\
                   2024-03-04 08:00:00,1,bus,0.1,Main Gate,4\n";
        assert!(matches!(load_rides_reader(Cursor::new(csv)), Err(ScheduleError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("em-schedule-no-such-dir").join("rides.csv");
        assert!(matches!(load_rides_csv(&path), Err(ScheduleError::Io(_))));
        assert!(matches!(load_sites_csv(&path), Err(ScheduleError::Io(_))));
    }

    #[test]
    fn loads_sites_including_oversubscribed() {
        let sites = load_sites_reader(Cursor::new(SITES_CSV)).unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].name, "Main Gate");
        assert_eq!(sites[0].location.lat, 28.3835);
        assert!(sites[1].is_oversubscribed());
    }

    #[test]
    fn site_out_of_range_is_invalid_coordinate() {
        let csv = "name,lat,lon,capacity,current_demand\nNowhere,95.0,36.0,5,0\n";
        assert!(matches!(
            load_sites_reader(Cursor::new(csv)),
            Err(ScheduleError::Core(EmError::InvalidCoordinate { .. }))
        ));
    }

    #[test]
    fn zero_capacity_site_rejected() {
        let csv = "name,lat,lon,capacity,current_demand\nKiosk,28.38,36.48,0,0\n";
        assert!(matches!(load_sites_reader(Cursor::new(csv)), Err(ScheduleError::Parse(_))));
    }
}
