//! Uniform lat/lon sampling grid around a centre point.
//!
//! # Layout
//!
//! For half size `h` the grid has `side = 2h + 1` rows and columns.  Item
//! `k` of the iteration is at
//!
//! ```text
//! i = k / side − h        (row, latitude direction)
//! j = k % side − h        (column, longitude direction)
//! point = center + (i · lat_step, j · lon_step)
//! ```
//!
//! so generation order is row-major from the south-west corner, and the
//! centre is item `h · side + h`.  Steps are `radius_m / h` metres converted
//! with [`degrees_per_meter`] at the centre latitude.  Longitudes are folded
//! back into `[-180, 180]`, so a grid straddling the antimeridian yields only
//! valid coordinates.

use em_core::{Coordinate, EmError, EmResult, degrees_per_meter};

/// Grid half size used when none is configured: a 21 × 21 grid.
pub const DEFAULT_GRID_HALF_SIZE: u32 = 10;

/// An immutable candidate grid.  Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CandidateGrid {
    center:   Coordinate,
    half:     u32,
    side:     usize,
    len:      usize,
    lat_step: f64,
    lon_step: f64,
}

impl CandidateGrid {
    /// Build a grid of `(2·grid_half_size + 1)²` points spanning `radius_m`
    /// in each direction from `center`.
    ///
    /// # Errors
    /// - [`EmError::InvalidCoordinate`] if `center` is out of range.
    /// - [`EmError::InvalidParameter`] if `radius_m` is not a positive finite
    ///   number or `grid_half_size` is zero.
    ///
    /// # Preconditions
    /// `center` is not at a pole (see [`degrees_per_meter`]).
    pub fn new(center: Coordinate, radius_m: f64, grid_half_size: u32) -> EmResult<Self> {
        center.validate()?;
        if !(radius_m.is_finite() && radius_m > 0.0) {
            return Err(EmError::InvalidParameter(format!(
                "radius_m must be a positive number of metres, got {radius_m}"
            )));
        }
        if grid_half_size == 0 {
            return Err(EmError::InvalidParameter("grid_half_size must be at least 1".into()));
        }

        let side = (grid_half_size as usize)
            .checked_mul(2)
            .and_then(|s| s.checked_add(1))
            .ok_or_else(|| EmError::InvalidParameter(format!("grid_half_size {grid_half_size} too large")))?;
        let len = side
            .checked_mul(side)
            .ok_or_else(|| EmError::InvalidParameter(format!("grid_half_size {grid_half_size} too large")))?;

        let step_m = radius_m / grid_half_size as f64;
        let (lat_per_m, lon_per_m) = degrees_per_meter(center.lat);

        Ok(Self {
            center,
            half: grid_half_size,
            side,
            len,
            lat_step: step_m * lat_per_m,
            lon_step: step_m * lon_per_m,
        })
    }

    /// Like [`new`](Self::new) with [`DEFAULT_GRID_HALF_SIZE`].
    pub fn with_default_size(center: Coordinate, radius_m: f64) -> EmResult<Self> {
        Self::new(center, radius_m, DEFAULT_GRID_HALF_SIZE)
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn half_size(&self) -> u32 {
        self.half
    }

    /// Total number of candidates, `(2h + 1)²`.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a valid grid has at least 9 points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(lat_step, lon_step)` between neighbouring candidates, degrees.
    pub fn steps(&self) -> (f64, f64) {
        (self.lat_step, self.lon_step)
    }

    /// Candidate at signed grid offsets `(i, j)`, or `None` outside the grid.
    pub fn point(&self, i: i64, j: i64) -> Option<Coordinate> {
        let h = self.half as i64;
        if i.abs() > h || j.abs() > h {
            return None;
        }
        Some(self.center.offset(i as f64 * self.lat_step, j as f64 * self.lon_step).wrapped())
    }

    /// A fresh iterator from the first candidate.
    pub fn iter(&self) -> GridIter {
        GridIter { grid: *self, next: 0 }
    }

    fn nth_point(&self, k: usize) -> Coordinate {
        let h = self.half as i64;
        let i = (k / self.side) as i64 - h;
        let j = (k % self.side) as i64 - h;
        self.center.offset(i as f64 * self.lat_step, j as f64 * self.lon_step).wrapped()
    }
}

impl IntoIterator for &CandidateGrid {
    type Item = Coordinate;
    type IntoIter = GridIter;
    fn into_iter(self) -> GridIter {
        self.iter()
    }
}

/// Lazy row-major iterator over a [`CandidateGrid`].
#[derive(Clone, Debug)]
pub struct GridIter {
    grid: CandidateGrid,
    next: usize,
}

impl Iterator for GridIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        if self.next >= self.grid.len {
            return None;
        }
        let p = self.grid.nth_point(self.next);
        self.next += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.grid.len - self.next;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for GridIter {}
