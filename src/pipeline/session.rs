//! Per-run session state and the tick pipeline.

use crate::error::{ForecastResult, FrameError};
use crate::io::protocol::{InboundFrame, OutboundFrame};
use crate::pipeline::coords::{discretize, to_local, to_world, LocalPoint};
use crate::pipeline::entities::DoorSet;
use crate::pipeline::grids::{crop_walls, door_occupancy, npc_occupancy, FloorLayout, Observer};
use crate::pipeline::memory::{history_capacity, CumulativeVisibility, FeatureFrame, FeatureHistory};
use crate::pipeline::motion::MotionTracker;
use crate::pipeline::params::{MAX_LOOKAHEAD, NPC_ALIVE, NPC_DEAD};
use crate::pipeline::predictor::{forecast, Bucket, ModelSet};

/// Result of one processed tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutput {
    pub bucket: Bucket,
    /// Forecast in the local frame
    pub forecast: Vec<(f64, f64)>,
    /// Forecast in the world frame, ready to send
    pub outbound: OutboundFrame,
}

/// Everything that persists between ticks for one run.
///
/// Visibility masks and histories only grow or slide; nothing is reset
/// until the session is dropped.
pub struct Session {
    layout: FloorLayout,
    doors: DoorSet,
    models: ModelSet,
    motion: MotionTracker,
    history: FeatureHistory,
    npcs_seen: CumulativeVisibility,
    open_seen: CumulativeVisibility,
    closed_seen: CumulativeVisibility,
    ticks: u64,
}

impl Session {
    #[must_use]
    pub fn new(layout: FloorLayout, doors: DoorSet, models: ModelSet) -> Self {
        let open_seen = CumulativeVisibility::with_len(doors.open.len());
        let closed_seen = CumulativeVisibility::with_len(doors.closed.len());
        Self {
            layout,
            doors,
            models,
            motion: MotionTracker::new(),
            history: FeatureHistory::new(),
            npcs_seen: CumulativeVisibility::new(),
            open_seen,
            closed_seen,
            ticks: 0,
        }
    }

    /// Runs one tick: update features, predict, convert to world frame.
    ///
    /// A frame that fails validation leaves the session untouched.
    pub fn process(&mut self, frame: &InboundFrame) -> ForecastResult<TickOutput> {
        self.validate(frame)?;

        let lookahead = frame.timing.lookahead;
        let local = to_local(frame.player.position);
        let observer = Observer::new(local);

        let npc_flags: Vec<bool> = frame.npcs.iter().map(|npc| npc.visible).collect();
        self.npcs_seen.observe(&npc_flags);
        self.open_seen.observe(&frame.open_doors);
        self.closed_seen.observe(&frame.closed_doors);

        let features = FeatureFrame {
            displacement: self.motion.step(local.x, local.y),
            walls: crop_walls(&self.layout, discretize(local)),
            alive_npcs: npc_occupancy(&observer, &frame.npcs, &self.npcs_seen, NPC_ALIVE),
            dead_npcs: npc_occupancy(&observer, &frame.npcs, &self.npcs_seen, NPC_DEAD),
            open_doors: door_occupancy(&observer, &self.doors.open, &self.open_seen),
            closed_doors: door_occupancy(&observer, &self.doors.closed, &self.closed_seen),
        };
        self.history.record(features, history_capacity(lookahead));
        self.ticks += 1;

        let prediction = forecast(&self.models, &self.history, (local.x, local.y), lookahead)?;
        let points = prediction
            .points
            .iter()
            .map(|&(x, y)| to_world(LocalPoint::new(x, y, local.z)))
            .collect();

        Ok(TickOutput {
            bucket: prediction.bucket,
            forecast: prediction.points,
            outbound: OutboundFrame {
                tick_time: frame.timing.total,
                points,
            },
        })
    }

    /// Door flag lists must match the door table, or be empty while the
    /// simulation has not registered its doors yet.
    #[allow(clippy::cast_precision_loss)]
    fn validate(&self, frame: &InboundFrame) -> Result<(), FrameError> {
        if frame.timing.lookahead > MAX_LOOKAHEAD {
            return Err(FrameError::Lookahead(frame.timing.lookahead as f64));
        }
        let checks = [
            ("open", frame.open_doors.len(), self.doors.open.len()),
            ("closed", frame.closed_doors.len(), self.doors.closed.len()),
        ];
        for (kind, found, expected) in checks {
            if found != 0 && found != expected {
                return Err(FrameError::DoorCount {
                    kind,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn history(&self) -> &FeatureHistory {
        &self.history
    }

    #[must_use]
    pub fn npcs_seen(&self) -> &CumulativeVisibility {
        &self.npcs_seen
    }

    #[must_use]
    pub fn open_doors_seen(&self) -> &CumulativeVisibility {
        &self.open_seen
    }

    #[must_use]
    pub fn closed_doors_seen(&self) -> &CumulativeVisibility {
        &self.closed_seen
    }

    /// Ticks processed successfully so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
