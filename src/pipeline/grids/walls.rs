//! Static per-floor wall maps and the egocentric crop taken each tick.

use std::path::Path;

use crate::error::ForecastError;
use crate::pipeline::coords::{Cell, Floor};
use crate::pipeline::grids::WallGrid;
use crate::pipeline::params::{MAP_MAX_X, MAP_MAX_Y, WALL_GRID_SIZE};

/// Binary wall map of one floor, indexed `[y][x]` in cell units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallMap {
    rows: Vec<Vec<u8>>,
}

impl WallMap {
    /// Builds a map from raw rows. Anything other than 1 is open floor.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|v| u8::from(v == 1)).collect())
            .collect();
        Self { rows }
    }

    /// Loads a headerless CSV of cell values, one map row per line.
    ///
    /// Cells that are empty or not exactly 1 are open floor.
    pub fn from_csv(path: &Path) -> Result<Self, ForecastError> {
        let layout_err = |source| ForecastError::Layout {
            path: path.display().to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(layout_err)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(layout_err)?;
            let row = record
                .iter()
                .map(|field| u8::from(field.parse::<f64>().is_ok_and(|v| v == 1.0)))
                .collect();
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Wall value at a cell; anything outside the map is open.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn get(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 {
            return 0;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Returns (width, height) in cells, width taken from the widest row.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (width, self.rows.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The wall maps of both floors.
#[derive(Clone, Debug, Default)]
pub struct FloorLayout {
    pub lower: WallMap,
    pub upper: WallMap,
}

impl FloorLayout {
    #[must_use]
    pub fn new(lower: WallMap, upper: WallMap) -> Self {
        Self { lower, upper }
    }

    /// Loads whichever floor maps are configured; missing ones stay empty.
    pub fn load(lower: Option<&Path>, upper: Option<&Path>) -> Result<Self, ForecastError> {
        let lower = lower.map(WallMap::from_csv).transpose()?.unwrap_or_default();
        let upper = upper.map(WallMap::from_csv).transpose()?.unwrap_or_default();
        Ok(Self { lower, upper })
    }

    #[must_use]
    pub fn floor(&self, floor: Floor) -> &WallMap {
        match floor {
            Floor::Lower => &self.lower,
            Floor::Upper => &self.upper,
        }
    }
}

/// Crops the wall grid centered on the shooter's cell.
///
/// Returns an empty grid when the cell is unknown or outside the building's
/// bounding box.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn crop_walls(layout: &FloorLayout, cell: Option<Cell>) -> WallGrid {
    let mut grid = WallGrid::new();
    let Some(cell) = cell else {
        return grid;
    };
    if cell.x < 0 || cell.y < 0 || cell.x > MAP_MAX_X || cell.y > MAP_MAX_Y {
        return grid;
    }

    let map = layout.floor(cell.floor);
    let half = (WALL_GRID_SIZE as i64 - 1) / 2;
    for row in 0..WALL_GRID_SIZE {
        for col in 0..WALL_GRID_SIZE {
            let map_y = cell.y - half + row as i64;
            let map_x = cell.x - half + col as i64;
            grid.set(row, col, map.get(map_x, map_y));
        }
    }
    grid
}
