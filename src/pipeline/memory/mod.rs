//! Session memory for the feature pipeline.
//!
//! This module provides:
//! - Bounded per-channel histories of feature frames
//! - Latched visibility masks for NPCs and doors

mod history;
mod visibility;

pub use history::HistoryBuffer;
pub use visibility::CumulativeVisibility;

use crate::pipeline::grids::{PolarGrid, WallGrid};

/// Every feature channel computed for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FeatureFrame {
    /// Shooter displacement since the previous tick, in cells
    pub displacement: [f64; 2],
    pub walls: WallGrid,
    pub alive_npcs: PolarGrid,
    pub dead_npcs: PolarGrid,
    pub open_doors: PolarGrid,
    pub closed_doors: PolarGrid,
}

/// The six per-channel histories, fed together once per tick.
#[derive(Clone, Debug, Default)]
pub struct FeatureHistory {
    pub displacements: HistoryBuffer<[f64; 2]>,
    pub walls: HistoryBuffer<WallGrid>,
    pub alive_npcs: HistoryBuffer<PolarGrid>,
    pub dead_npcs: HistoryBuffer<PolarGrid>,
    pub open_doors: HistoryBuffer<PolarGrid>,
    pub closed_doors: HistoryBuffer<PolarGrid>,
}

impl FeatureHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one tick to every channel with the same trim point.
    pub fn record(&mut self, frame: FeatureFrame, capacity: usize) {
        self.displacements.append(frame.displacement, capacity);
        self.walls.append(frame.walls, capacity);
        self.alive_npcs.append(frame.alive_npcs, capacity);
        self.dead_npcs.append(frame.dead_npcs, capacity);
        self.open_doors.append(frame.open_doors, capacity);
        self.closed_doors.append(frame.closed_doors, capacity);
    }

    /// Number of ticks held, as used for bucket selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.displacements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.displacements.is_empty()
    }
}

/// Trim point for a requested look-ahead, in ticks.
#[must_use]
pub const fn history_capacity(lookahead: usize) -> usize {
    lookahead.saturating_mul(2).saturating_add(1)
}
