//! Unit tests for em-core primitives.

#[cfg(test)]
mod geo {
    use crate::{Coordinate, EmError, degrees_per_meter, distance, wrap_longitude};

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn zero_distance() {
        let p = c(28.3835, 36.4868);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (c(28.3835, 36.4868), c(28.3840, 36.4873)),
            (c(-33.9, 18.4), c(51.5, -0.12)),
            (c(0.0, 179.9), c(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a), "{a} vs {b}");
        }
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~1 degree of latitude ≈ 111.19 km on a 6,371 km sphere
        let d = distance(c(30.0, -88.0), c(31.0, -88.0));
        assert!((d - 111_195.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn campus_scale_distance() {
        // Main gate → engineering: ~75 m
        let d = c(28.3835, 36.4868).distance_m(c(28.3840, 36.4873));
        assert!(d > 60.0 && d < 90.0, "got {d}");
    }

    #[test]
    fn latitude_step_matches_haversine() {
        let (lat_step, _) = degrees_per_meter(28.3835);
        let origin = c(28.3835, 36.4868);
        let d = distance(origin, origin.offset(lat_step * 250.0, 0.0));
        assert!((d - 250.0).abs() < 1e-4, "got {d}");
    }

    #[test]
    fn longitude_step_widens_with_latitude() {
        let (lat0, lon0) = degrees_per_meter(0.0);
        let (_, lon60) = degrees_per_meter(60.0);
        assert!((lat0 - lon0).abs() < 1e-15);
        assert!((lon60 / lon0 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn longitude_step_matches_haversine_at_campus_latitude() {
        let origin = c(28.3835, 36.4868);
        let (_, lon_step) = degrees_per_meter(origin.lat);
        let d = distance(origin, origin.offset(0.0, lon_step * 100.0));
        assert!((d - 100.0).abs() < 0.01, "got {d}");
    }

    #[test]
    fn new_validates_ranges() {
        assert!(Coordinate::new(28.38, 36.48).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(EmError::InvalidCoordinate { lat: 90.5, lon: 0.0 })
        );
        assert!(Coordinate::new(0.0, -180.01).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn longitude_wraps_across_antimeridian() {
        assert_eq!(wrap_longitude(36.4868), 36.4868);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert!((wrap_longitude(180.0004) - -179.9996).abs() < 1e-9);
        assert!((wrap_longitude(-180.5) - 179.5).abs() < 1e-9);
        assert!((wrap_longitude(540.25) - -179.75).abs() < 1e-9);

        let east = c(-16.8, 180.0004);
        let w = east.wrapped();
        assert!(w.validate().is_ok());
        assert_eq!(w.lat, east.lat);
        assert!(distance(east, w) < 1e-6);
    }

    #[test]
    fn display() {
        assert_eq!(c(28.3835, 36.4868).to_string(), "(28.383500, 36.486800)");
    }
}

#[cfg(test)]
mod site {
    use crate::{Coordinate, ExistingSite};

    fn gate(capacity: u32, demand: u32) -> ExistingSite {
        ExistingSite::new("Main Gate", Coordinate { lat: 28.3835, lon: 36.4868 }, capacity, demand)
    }

    #[test]
    fn utilization_ratio() {
        assert_eq!(gate(20, 5).utilization(), 0.25);
        assert_eq!(gate(15, 15).utilization(), 1.0);
    }

    #[test]
    fn oversubscription_is_visible() {
        let s = gate(10, 14);
        assert!(s.is_oversubscribed());
        assert!((s.utilization() - 1.4).abs() < 1e-12);
        assert!(!gate(10, 10).is_oversubscribed());
    }

    #[test]
    fn zero_capacity_has_zero_utilization() {
        assert_eq!(gate(0, 3).utilization(), 0.0);
    }
}
