//! Tabuk University campus fixture: the five existing pickup points.

use em_core::{Coordinate, ExistingSite};

/// Main gate; also the centre of the recommendation grid.
pub const CAMPUS_CENTER: Coordinate = Coordinate { lat: 28.3835, lon: 36.4868 };

// name, lat, lon, capacity, current_demand
const SITES: [(&str, f64, f64, u32, u32); 5] = [
    ("Main Gate",              28.3835, 36.4868, 15, 15),
    ("College of Engineering", 28.3840, 36.4873, 20, 12),
    ("College of Medicine",    28.3830, 36.4863, 20, 23),
    ("Student Housing",        28.3845, 36.4878, 30, 18),
    ("University Library",     28.3833, 36.4870, 10,  4),
];

pub fn campus_sites() -> Vec<ExistingSite> {
    SITES
        .iter()
        .map(|&(name, lat, lon, capacity, demand)| {
            ExistingSite::new(name, Coordinate { lat, lon }, capacity, demand)
        })
        .collect()
}
