//! Polar binning of a target relative to an observer.

use std::f64::consts::TAU;

use crate::pipeline::params::{ANGLE_BINS, MAX_RANGE, RANGE_BINS};

/// A (range, angle) bin on the polar occupancy grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadialBin {
    pub range: usize,
    pub angle: usize,
}

/// Bearing from observer to target in `[0, 2π)`.
#[must_use]
pub fn bearing(observer: (f64, f64), target: (f64, f64)) -> f64 {
    let theta = (target.1 - observer.1).atan2(target.0 - observer.0);
    if theta < 0.0 {
        TAU + theta
    } else if theta > TAU {
        // unreachable for atan2 output
        theta - TAU
    } else {
        theta
    }
}

/// Places a target on the polar grid. `None` when it lies beyond the
/// covered radius or its position is unknown.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn radial_bin(observer: (f64, f64), target: (f64, f64)) -> Option<RadialBin> {
    let range_step = MAX_RANGE / RANGE_BINS as f64;
    let angle_step = TAU / ANGLE_BINS as f64;

    let radius = (target.0 - observer.0).hypot(target.1 - observer.1);
    if !radius.is_finite() {
        return None;
    }

    let range = (radius / range_step).floor();
    if range >= RANGE_BINS as f64 {
        return None;
    }

    // A bearing that rounds up to exactly 2π belongs to the last sector
    let angle = ((bearing(observer, target) / angle_step).floor() as usize).min(ANGLE_BINS - 1);

    Some(RadialBin {
        range: range as usize,
        angle,
    })
}
