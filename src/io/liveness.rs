//! Idle watchdog for the inbound stream.

use std::time::{Duration, Instant};

/// What the watchdog wants the loop to do after a poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LivenessEvent {
    Quiet,
    SignalLost,
    ShutdownImminent,
    Expired,
}

/// Tracks silence since the last frame.
///
/// Nothing fires before the first frame. Each warning fires once per
/// silence period, in order; a new frame re-arms them.
#[derive(Debug, Clone)]
pub struct Liveness {
    warn_after: Duration,
    imminent_after: Duration,
    expire_after: Duration,
    last_frame: Option<Instant>,
    fired: u8,
}

impl Liveness {
    #[must_use]
    pub fn new(warn_after: Duration, imminent_after: Duration, expire_after: Duration) -> Self {
        Self {
            warn_after,
            imminent_after,
            expire_after,
            last_frame: None,
            fired: 0,
        }
    }

    pub fn on_frame(&mut self, now: Instant) {
        self.last_frame = Some(now);
        self.fired = 0;
    }

    #[must_use]
    pub fn has_started(&self) -> bool {
        self.last_frame.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> LivenessEvent {
        let Some(last) = self.last_frame else {
            return LivenessEvent::Quiet;
        };
        let idle = now.saturating_duration_since(last);

        if idle >= self.expire_after {
            self.fired = 3;
            LivenessEvent::Expired
        } else if self.fired < 1 && idle >= self.warn_after {
            self.fired = 1;
            LivenessEvent::SignalLost
        } else if self.fired < 2 && idle >= self.imminent_after {
            self.fired = 2;
            LivenessEvent::ShutdownImminent
        } else {
            LivenessEvent::Quiet
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(5),
            Duration::from_secs(8),
            Duration::from_secs(10),
        )
    }
}
