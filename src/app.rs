//! The receive → process → send loop.

use std::io;
use std::time::Instant;

use log::{debug, info, trace, warn};

use crate::io::{FrameSink, InboundFrame, Liveness, LivenessEvent, Transport};
use crate::pipeline::Session;

/// Counters reported when the loop ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Datagrams received
    pub frames: u64,
    /// Forecasts sent back
    pub forecasts: u64,
    /// Frames dropped by the parser or the pipeline
    pub skipped: u64,
}

/// Runs until the liveness watchdog expires.
///
/// Bad frames and failed forecasts are logged and skipped; only transport
/// receive errors end the loop early.
pub fn run_app<T: Transport, S: FrameSink>(
    session: &mut Session,
    transport: &mut T,
    sink: &mut S,
    liveness: &mut Liveness,
) -> io::Result<RunStats> {
    let mut stats = RunStats::default();
    loop {
        let Some(raw) = transport.receive()? else {
            match liveness.poll(Instant::now()) {
                LivenessEvent::Quiet => {}
                LivenessEvent::SignalLost => warn!("No signal from the simulation"),
                LivenessEvent::ShutdownImminent => {
                    warn!("Still no signal, shutting down soon");
                }
                LivenessEvent::Expired => {
                    info!("Simulation went silent, stopping");
                    return Ok(stats);
                }
            }
            continue;
        };

        if !liveness.has_started() {
            info!("Simulation connected");
        }
        liveness.on_frame(Instant::now());
        stats.frames += 1;

        let frame: InboundFrame = match raw.parse() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Skipping frame {}: {e}", stats.frames);
                stats.skipped += 1;
                continue;
            }
        };
        sink.record(frame.timing.since_event, &raw);
        if let Some(robots) = &frame.robots {
            trace!("robots: {robots:?}");
        }

        match session.process(&frame) {
            Ok(tick) => {
                debug!(
                    "t={}: bucket {}, {} ticks kept, seen {} NPCs, {}/{} doors",
                    frame.timing.total,
                    tick.bucket.ticks(),
                    session.history().len(),
                    session.npcs_seen().seen_count(),
                    session.open_doors_seen().seen_count(),
                    session.closed_doors_seen().seen_count()
                );
                if let Err(e) = transport.send(&tick.outbound.to_string()) {
                    warn!("Failed to send forecast: {e}");
                } else {
                    stats.forecasts += 1;
                }
            }
            Err(e) => {
                warn!("Skipping tick at t={}: {e}", frame.timing.total);
                stats.skipped += 1;
            }
        }
    }
}
