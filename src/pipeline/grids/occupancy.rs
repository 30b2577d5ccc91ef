//! Polar occupancy channels around the shooter.

use crate::pipeline::coords::{discretize, to_local, Floor, LocalPoint, WorldPoint};
use crate::pipeline::entities::Npc;
use crate::pipeline::grids::PolarGrid;
use crate::pipeline::memory::CumulativeVisibility;
use crate::pipeline::radial::radial_bin;

/// The shooter as seen by the encoders: local position and floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observer {
    pub x: f64,
    pub y: f64,
    pub floor: Option<Floor>,
}

impl Observer {
    #[must_use]
    pub fn new(local: LocalPoint) -> Self {
        Self {
            x: local.x,
            y: local.y,
            floor: discretize(local).map(|cell| cell.floor),
        }
    }
}

/// Marks every target on the observer's floor within range.
///
/// Targets with unknown positions, on the other floor, or beyond the polar
/// grid's radius contribute nothing. An observer with no floor yields an
/// empty grid.
#[must_use]
pub fn occupancy<I>(observer: &Observer, targets: I) -> PolarGrid
where
    I: IntoIterator<Item = WorldPoint>,
{
    let mut grid = PolarGrid::new();
    let Some(floor) = observer.floor else {
        return grid;
    };

    for target in targets {
        let local = to_local(target);
        match discretize(local) {
            Some(cell) if cell.floor == floor => {}
            _ => continue,
        }
        if let Some(bin) = radial_bin((observer.x, observer.y), (local.x, local.y)) {
            grid.set(bin.range, bin.angle, 1);
        }
    }
    grid
}

/// Occupancy of NPCs that have ever been seen and are in `state`.
#[must_use]
pub fn npc_occupancy(
    observer: &Observer,
    npcs: &[Npc],
    seen: &CumulativeVisibility,
    state: i32,
) -> PolarGrid {
    let targets = npcs
        .iter()
        .enumerate()
        .filter(|(i, npc)| seen.is_seen(*i) && npc.state == state)
        .map(|(_, npc)| npc.position);
    occupancy(observer, targets)
}

/// Occupancy of doors that have ever been seen.
#[must_use]
pub fn door_occupancy(
    observer: &Observer,
    doors: &[WorldPoint],
    seen: &CumulativeVisibility,
) -> PolarGrid {
    let targets = doors
        .iter()
        .enumerate()
        .filter(|(i, _)| seen.is_seen(*i))
        .map(|(_, door)| *door);
    occupancy(observer, targets)
}
