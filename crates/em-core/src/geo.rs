//! Geographic coordinate type and great-circle utilities.
//!
//! `Coordinate` uses `f64` latitude/longitude.  Candidate grids are spaced a
//! few tens of metres apart and the grid centre must round-trip exactly, so
//! single precision is not enough here.
//!
//! Degree/metre conversion is derived from the same sphere as the haversine
//! distance, so a grid step of `d` metres along a meridian measures exactly
//! `d` metres with [`distance`].

use crate::{EmError, EmResult};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Construct a validated coordinate.
    ///
    /// Fails with [`EmError::InvalidCoordinate`] if either component is
    /// non-finite or outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> EmResult<Self> {
        let c = Self { lat, lon };
        c.validate()?;
        Ok(c)
    }

    /// Check the WGS-84 range invariant on an already-built value.
    pub fn validate(&self) -> EmResult<()> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(EmError::InvalidCoordinate { lat: self.lat, lon: self.lon })
        }
    }

    /// Haversine great-circle distance in metres.  See [`distance`].
    #[inline]
    pub fn distance_m(self, other: Coordinate) -> f64 {
        distance(self, other)
    }

    /// Shift by raw degree offsets.  No range check is applied.
    #[inline]
    pub fn offset(self, d_lat: f64, d_lon: f64) -> Coordinate {
        Coordinate { lat: self.lat + d_lat, lon: self.lon + d_lon }
    }

    /// The same point with longitude folded into `[-180, 180]`.
    ///
    /// In-range values are returned unchanged, bit for bit.  Latitude is not
    /// touched.
    #[inline]
    pub fn wrapped(self) -> Coordinate {
        Coordinate { lat: self.lat, lon: wrap_longitude(self.lon) }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Fold `lon` into `[-180, 180]`.  Values already in range are kept as-is.
pub fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) || !lon.is_finite() {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Haversine great-circle distance between `a` and `b` in metres.
///
/// Symmetric in its arguments and exactly zero for identical inputs.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

    // `min(1.0)` guards the asin domain against rounding on antipodal pairs.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Degrees of latitude and longitude spanned by one metre at `latitude`.
///
/// Returns `(lat_step, lon_step)`.  The latitude step is constant; the
/// longitude step grows by `1 / cos(latitude)` as meridians converge.
///
/// # Preconditions
/// `|latitude| < 90`.  At the poles the longitude step diverges; campus
/// deployments never request grids there, so this is not checked.
#[inline]
pub fn degrees_per_meter(latitude: f64) -> (f64, f64) {
    let lat_step = 180.0 / (std::f64::consts::PI * EARTH_RADIUS_M);
    let lon_step = lat_step / latitude.to_radians().cos();
    (lat_step, lon_step)
}
