//! core/grid.rs — rectangular stimulus lattice.
//!
//! Locations are 1-based and row-major: on a 4×6 grid, location 1 is (1, 1),
//! location 6 is (1, 6) and location 7 is (2, 1).

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 1-based row-major location identifier.
pub type LocationId = usize;

/// 1-based (row, col) grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Euclidean distance in grid units (no wrap-around).
    pub fn distance(&self, other: Coord) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        dr.hypot(dc)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of locations.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, location: LocationId) -> bool {
        (1..=self.len()).contains(&location)
    }

    pub fn locations(&self) -> RangeInclusive<LocationId> {
        1..=self.len()
    }

    pub fn coord_of(&self, location: LocationId) -> Option<Coord> {
        if !self.contains(location) {
            return None;
        }
        let idx = location - 1;
        Some(Coord {
            row: idx / self.cols + 1,
            col: idx % self.cols + 1,
        })
    }

    pub fn location_at(&self, coord: Coord) -> Option<LocationId> {
        if !self.contains_coord(coord) {
            return None;
        }
        Some((coord.row - 1) * self.cols + coord.col)
    }

    #[inline]
    pub fn contains_coord(&self, coord: Coord) -> bool {
        (1..=self.rows).contains(&coord.row) && (1..=self.cols).contains(&coord.col)
    }

    /// Toroidal wrap of a possibly out-of-range 1-based coordinate.
    pub fn wrap(&self, row: i64, col: i64) -> Coord {
        let rows = self.rows as i64;
        let cols = self.cols as i64;
        Coord {
            row: ((row - 1).rem_euclid(rows) + 1) as usize,
            col: ((col - 1).rem_euclid(cols) + 1) as usize,
        }
    }

    /// Spread of channel preferences and of the response kernel: sqrt(N) / 6.
    pub fn tuning_sigma(&self) -> f64 {
        (self.len() as f64).sqrt() / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_ids() {
        let grid = Grid::new(4, 6).unwrap();
        assert_eq!(grid.len(), 24);
        assert_eq!(grid.coord_of(1), Some(Coord::new(1, 1)));
        assert_eq!(grid.coord_of(6), Some(Coord::new(1, 6)));
        assert_eq!(grid.coord_of(7), Some(Coord::new(2, 1)));
        assert_eq!(grid.coord_of(12), Some(Coord::new(2, 6)));
        assert_eq!(grid.coord_of(24), Some(Coord::new(4, 6)));
        assert_eq!(grid.coord_of(0), None);
        assert_eq!(grid.coord_of(25), None);

        for id in grid.locations() {
            let coord = grid.coord_of(id).unwrap();
            assert_eq!(grid.location_at(coord), Some(id));
        }
    }

    #[test]
    fn wrap_is_toroidal() {
        let grid = Grid::new(4, 6).unwrap();
        assert_eq!(grid.wrap(0, 0), Coord::new(4, 6));
        assert_eq!(grid.wrap(5, 7), Coord::new(1, 1));
        assert_eq!(grid.wrap(-3, -5), Coord::new(1, 1));
        assert_eq!(grid.wrap(2, 3), Coord::new(2, 3));
        assert_eq!(grid.wrap(13, 19), Coord::new(1, 1));
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            Grid::new(0, 6),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 6 })
        );
        assert!(Grid::new(3, 0).is_err());
    }

    #[test]
    fn sigma_scales_with_sqrt_locations() {
        let grid = Grid::new(6, 6).unwrap();
        assert!((grid.tuning_sigma() - 1.0).abs() < 1e-12);
    }
}
