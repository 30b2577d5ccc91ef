//! Per-tick grid encodings of the shooter's surroundings.
//!
//! This module provides:
//! - An egocentric wall crop around the shooter's cell
//! - Polar occupancy channels for NPCs and doors

mod occupancy;
mod walls;

pub use occupancy::{door_occupancy, npc_occupancy, occupancy, Observer};
pub use walls::{crop_walls, FloorLayout, WallMap};

use crate::pipeline::params::{ANGLE_BINS, RANGE_BINS, WALL_GRID_SIZE};

/// A fixed-size binary grid, `H` rows by `W` columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryGrid<const W: usize, const H: usize> {
    cells: [[u8; W]; H],
}

/// 21×21 wall crop, rows along local y.
pub type WallGrid = BinaryGrid<WALL_GRID_SIZE, WALL_GRID_SIZE>;

/// 20×20 polar grid, rows are range bins and columns angle bins.
pub type PolarGrid = BinaryGrid<ANGLE_BINS, RANGE_BINS>;

impl<const W: usize, const H: usize> Default for BinaryGrid<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> BinaryGrid<W, H> {
    /// Creates an all-zero grid.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [[0; W]; H] }
    }

    /// Reads a cell; out-of-bounds reads as empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    /// Writes a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }

    /// Number of set cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&v| v != 0)
            .count()
    }

    /// Row-major flattening, as fed to the predictors.
    pub fn flatten(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }
}
