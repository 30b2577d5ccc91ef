//! Per-tick shooter displacement in grid units.

use crate::pipeline::coords::round1;
use crate::pipeline::params::CELL_SIZE;

/// Tracks the previous shooter position to derive step displacements.
#[derive(Clone, Debug, Default)]
pub struct MotionTracker {
    previous: Option<(f64, f64)>,
}

impl MotionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current local position and returns the displacement
    /// since the last call, in cells rounded to one decimal.
    ///
    /// The very first call returns `[0.0, 0.0]`.
    pub fn step(&mut self, x: f64, y: f64) -> [f64; 2] {
        let displacement = match self.previous {
            Some((px, py)) => [round1((x - px) / CELL_SIZE), round1((y - py) / CELL_SIZE)],
            None => [0.0, 0.0],
        };
        self.previous = Some((x, y));
        displacement
    }
}
