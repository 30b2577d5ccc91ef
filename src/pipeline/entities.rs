//! Tracked entities: NPCs reported per tick and the building's static doors.

use crate::pipeline::coords::WorldPoint;
use crate::pipeline::params::{CLOSED_DOOR_COUNT, OPEN_DOOR_COUNT};

/// One NPC as reported in a telemetry frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Npc {
    pub position: WorldPoint,
    /// Visible to the shooter this tick
    pub visible: bool,
    /// State tag, see `NPC_ALIVE` / `NPC_DEAD`
    pub state: i32,
}

/// Static door positions in the world frame, split by open/closed state.
///
/// Door visibility arrives per tick as flags in the same order.
#[derive(Clone, Debug, PartialEq)]
pub struct DoorSet {
    pub open: Vec<WorldPoint>,
    pub closed: Vec<WorldPoint>,
}

impl Default for DoorSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl DoorSet {
    /// The doors of the standard building layout.
    #[must_use]
    pub fn standard() -> Self {
        let to_points = |table: &[[f64; 3]]| -> Vec<WorldPoint> {
            table
                .iter()
                .map(|&[x, y, z]| WorldPoint::new(x, y, z))
                .collect()
        };
        Self {
            open: to_points(&OPEN_DOORS),
            closed: to_points(&CLOSED_DOORS),
        }
    }

    #[must_use]
    pub fn new(open: Vec<WorldPoint>, closed: Vec<WorldPoint>) -> Self {
        Self { open, closed }
    }
}

#[rustfmt::skip]
const OPEN_DOORS: [[f64; 3]; OPEN_DOOR_COUNT] = [
    [655.5, 42.2, 999.4],
    [478.1, 10.0, 852.9],
    [484.5, 10.0, 833.0],
    [773.1, 53.0, 1104.1],
    [784.2, 53.0, 1112.2],
    [1280.7, 53.5, 374.2],
    [595.0, 42.5, 507.7],
    [600.4, 42.5, 718.5],
    [552.5, 42.5, 582.6],
    [472.2, 0.0, 672.6],
    [1047.8, 42.5, 343.9],
    [666.4, 0.0, 730.0],
    [547.2, 42.5, 702.8],
    [689.4, 42.5, 596.7],
    [707.0, 42.5, 315.6],
    [908.4, 42.5, 242.1],
    [1022.5, 42.5, 584.5],
];

#[rustfmt::skip]
const CLOSED_DOORS: [[f64; 3]; CLOSED_DOOR_COUNT] = [
    [963.7, 52.3, 264.9],
    [1249.3, 52.3, 236.3],
    [678.1, 52.3, 285.0],
    [536.2, 10.0, 471.7],
    [460.6, 10.0, 576.5],
    [423.3, 9.6, 628.6],
    [629.5, 42.2, 1063.4],
    [647.1, 42.2, 1027.5],
    [621.7, 42.2, 1079.5],
    [638.3, 42.2, 987.3],
    [635.2, 42.5, 978.7],
    [1019.4, 42.5, 824.8],
    [1030.6, 42.5, 808.6],
    [1142.8, 42.5, 647.3],
    [1154.0, 42.5, 631.1],
    [691.4, -0.5, 1167.9],
    [781.6, -0.5, 979.1],
    [710.1, -0.5, 928.2],
    [661.6, -0.5, 894.1],
    [1292.7, 53.5, 382.7],
    [528.1, 42.5, 666.8],
    [512.2, 42.5, 655.4],
    [525.9, 42.5, 619.8],
    [534.8, 42.5, 607.4],
    [481.2, 42.5, 646.2],
    [699.7, 42.5, 582.6],
    [896.8, 42.5, 233.8],
    [863.6, 42.5, 210.2],
    [884.8, 42.5, 250.4],
    [811.6, 42.5, 184.6],
    [778.2, 42.5, 232.2],
    [755.8, 42.5, 263.4],
    [746.0, 42.5, 276.8],
    [785.7, 42.5, 257.1],
    [794.5, 42.5, 244.8],
    [754.4, 42.5, 326.4],
    [765.5, 42.5, 334.4],
    [804.7, 42.5, 362.4],
    [805.2, 42.5, 385.8],
    [755.6, 42.5, 350.4],
    [743.0, 42.5, 341.4],
    [838.7, 42.5, 573.3],
    [851.2, 42.5, 582.2],
    [916.3, 42.5, 628.6],
    [958.0, 42.5, 658.3],
    [981.2, 42.5, 626.1],
    [867.6, 42.5, 544.8],
    [904.9, 42.5, 620.4],
    [1205.2, 42.5, 265.7],
    [1143.1, 42.5, 222.4],
    [1176.5, 42.5, 321.5],
    [1111.9, 42.5, 414.6],
    [1124.2, 42.5, 397.1],
    [1035.3, 42.5, 361.8],
    [933.3, 42.5, 450.8],
    [923.8, 42.5, 464.3],
    [976.8, 42.5, 511.5],
    [991.1, 42.5, 521.2],
    [1056.6, 42.5, 534.7],
    [1046.9, 42.5, 549.0],
    [750.1, 42.5, 608.0],
    [759.8, 42.5, 594.1],
    [715.4, 42.5, 667.5],
    [483.1, 42.5, 657.0],
    [560.7, 0.0, 716.3],
    [491.9, 0.0, 666.7],
    [469.3, 0.0, 650.5],
    [560.2, 0.0, 736.0],
    [709.7, 0.0, 666.8],
    [753.4, 0.0, 603.6],
    [774.6, 0.0, 571.9],
    [595.6, 0.0, 665.5],
    [517.4, 0.0, 609.5],
    [573.1, 0.0, 490.1],
    [614.9, 0.0, 520.0],
    [656.3, 0.0, 549.4],
    [697.4, 0.0, 578.8],
    [588.5, 42.5, 732.4],
    [507.6, 42.5, 609.2],
    [544.6, 42.5, 557.5],
    [588.1, 42.5, 533.0],
    [610.1, 42.5, 518.5],
    [651.2, 42.5, 548.2],
    [512.5, 0.0, 681.7],
    [547.6, 0.0, 727.0],
    [459.9, 0.0, 664.0],
    [578.0, 0.0, 728.5],
    [612.9, 0.0, 677.9],
    [531.1, 0.0, 619.1],
    [1117.3, 42.5, 243.6],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_door_counts() {
        let doors = DoorSet::standard();
        assert_eq!(doors.open.len(), OPEN_DOOR_COUNT);
        assert_eq!(doors.closed.len(), CLOSED_DOOR_COUNT);
    }

    #[test]
    fn test_door_table_order() {
        let doors = DoorSet::standard();
        assert_eq!(doors.open[0], WorldPoint::new(655.5, 42.2, 999.4));
        assert_eq!(doors.closed[89], WorldPoint::new(1117.3, 42.5, 243.6));
    }
}
