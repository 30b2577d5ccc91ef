//! Conversions between the simulation's world frame and the planar frame
//! used for feature construction, plus grid discretization.
//!
//! World frame: `(x, y, z)` as reported by the simulation, `y` is height.
//! Local frame: rescaled, translated and rotated so the building footprint
//! sits in a box aligned with the axes. Height becomes `z`.

use crate::pipeline::params::{
    CELL_SIZE, DEPTH_OFFSET, FLOOR_THRESHOLD, LOWER_FLOOR_HEIGHT, ORIGIN_X, ORIGIN_Y,
    ROTATION_DEG, SPATIAL_UNIT, UPPER_FLOOR_HEIGHT,
};

/// A position in the simulation's world frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A position in the local planar frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LocalPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when any component is not-a-number (unknown position).
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

/// One of the two building floors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Floor {
    Lower,
    Upper,
}

impl Floor {
    #[must_use]
    pub const fn height(self) -> f64 {
        match self {
            Self::Lower => LOWER_FLOOR_HEIGHT,
            Self::Upper => UPPER_FLOOR_HEIGHT,
        }
    }

    fn from_height(z: f64) -> Self {
        if z < FLOOR_THRESHOLD {
            Self::Lower
        } else {
            Self::Upper
        }
    }
}

/// A discrete grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
    pub floor: Floor,
}

/// Rounds to one decimal, ties to even.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Converts a world-frame position into the local frame.
#[must_use]
pub fn to_local(world: WorldPoint) -> LocalPoint {
    let (sin, cos) = ROTATION_DEG.to_radians().sin_cos();

    // axis remap + rescale
    let x1 = round1((DEPTH_OFFSET - world.z) / SPATIAL_UNIT);
    let y1 = round1(world.x / SPATIAL_UNIT);
    let z1 = round1(world.y / SPATIAL_UNIT);

    // translate, then rotate in the horizontal plane
    let dx = x1 - ORIGIN_X;
    let dy = y1 - ORIGIN_Y;
    LocalPoint {
        x: round1(dx * cos + dy * sin),
        y: round1(-dx * sin + dy * cos),
        z: z1,
    }
}

/// Converts a local-frame position back into the world frame.
#[must_use]
pub fn to_world(local: LocalPoint) -> WorldPoint {
    let (sin, cos) = ROTATION_DEG.to_radians().sin_cos();

    let dx = local.x * cos - local.y * sin;
    let dy = local.x * sin + local.y * cos;
    let x1 = dx + ORIGIN_X;
    let y1 = dy + ORIGIN_Y;

    WorldPoint {
        x: round1(y1 * SPATIAL_UNIT),
        y: round1(local.z * SPATIAL_UNIT),
        z: round1(DEPTH_OFFSET - x1 * SPATIAL_UNIT),
    }
}

/// Discretizes a local position. Unknown positions have no cell.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Building extents fit comfortably in i64
pub fn discretize(local: LocalPoint) -> Option<Cell> {
    if local.is_unknown() {
        return None;
    }
    Some(Cell {
        x: (local.x / CELL_SIZE + 0.5).floor() as i64,
        y: (local.y / CELL_SIZE + 0.5).floor() as i64,
        floor: Floor::from_height(local.z),
    })
}

/// Representative local position of a cell.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn cell_center(cell: Cell) -> LocalPoint {
    LocalPoint {
        x: round1(cell.x as f64 * CELL_SIZE),
        y: round1(cell.y as f64 * CELL_SIZE),
        z: cell.floor.height(),
    }
}
