//! Bucket selection and forecast assembly.

use log::debug;

use crate::error::{ForecastError, ForecastResult};
use crate::pipeline::memory::FeatureHistory;
use crate::pipeline::params::{CELL_SIZE, VELOCITY_WINDOW};
use crate::pipeline::predictor::{ModelInput, ModelSet};

/// A minimum-history tier. Each trained bucket `b` needs `2b` ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    Fallback,
    Short,
    Medium,
    Long,
}

impl Bucket {
    /// Enumeration order, which also breaks selection ties.
    pub const ALL: [Self; 4] = [Self::Fallback, Self::Short, Self::Medium, Self::Long];

    /// Look-ahead, in ticks, the bucket was trained for.
    #[must_use]
    pub const fn ticks(self) -> usize {
        match self {
            Self::Fallback => 0,
            Self::Short => 5,
            Self::Medium => 10,
            Self::Long => 20,
        }
    }

    /// History frames fed to the bucket's predictor.
    #[must_use]
    pub const fn window(self) -> usize {
        2 * self.ticks()
    }
}

/// Picks the bucket closest to `lookahead` among those the history can
/// feed. Ties go to the earlier bucket.
#[must_use]
pub fn select_bucket(history_len: usize, lookahead: usize) -> Option<Bucket> {
    Bucket::ALL
        .into_iter()
        .filter(|bucket| history_len >= bucket.window())
        .min_by_key(|bucket| lookahead.abs_diff(bucket.ticks()))
}

/// Constant-velocity extrapolation over the newest displacements.
///
/// Averages at most the last ten steps into a velocity `v` and returns the
/// raw deltas `v, 2v, .., steps * v`. No history means zero velocity.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn constant_velocity(displacements: &[[f64; 2]], steps: usize) -> Vec<[f64; 2]> {
    let recent = &displacements[displacements.len().saturating_sub(VELOCITY_WINDOW)..];
    let velocity = if recent.is_empty() {
        [0.0, 0.0]
    } else {
        let n = recent.len() as f64;
        let (sx, sy) = recent
            .iter()
            .fold((0.0, 0.0), |(sx, sy), d| (sx + d[0], sy + d[1]));
        [sx / n, sy / n]
    };
    (1..=steps)
        .map(|i| {
            let n = i as f64;
            [n * velocity[0], n * velocity[1]]
        })
        .collect()
}

/// Turns per-step deltas (in cells) into absolute local positions.
#[must_use]
pub fn accumulate(deltas: &[[f64; 2]], origin: (f64, f64)) -> Vec<(f64, f64)> {
    let mut cum_x = 0.0;
    let mut cum_y = 0.0;
    deltas
        .iter()
        .map(|d| {
            cum_x += d[0] * CELL_SIZE;
            cum_y += d[1] * CELL_SIZE;
            (cum_x + origin.0, cum_y + origin.1)
        })
        .collect()
}

/// Predicted local positions for the coming ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Forecast {
    pub bucket: Bucket,
    pub points: Vec<(f64, f64)>,
}

/// Produces a forecast for `lookahead` ticks (two steps per tick) starting
/// at the shooter's local position `origin`.
pub fn forecast(
    models: &ModelSet,
    history: &FeatureHistory,
    origin: (f64, f64),
    lookahead: usize,
) -> ForecastResult<Forecast> {
    let bucket = select_bucket(history.len(), lookahead).ok_or(ForecastError::NoBucket {
        history: history.len(),
    })?;
    let horizon = lookahead.saturating_mul(2);
    debug!(
        "history {} ticks, look-ahead {lookahead}: bucket {}",
        history.len(),
        bucket.ticks()
    );

    let deltas = match models.get(bucket) {
        None => {
            let steps: Vec<[f64; 2]> = history.displacements.iter().copied().collect();
            constant_velocity(&steps, horizon)
        }
        Some(predictor) => {
            let input = ModelInput::from_history(history, bucket.window(), horizon);
            debug!(
                "model input shapes: {:?}",
                input.channels().map(ndarray::ArrayBase::dim)
            );
            let raw = predictor.predict(&input)?;
            if raw.ncols() != 2 {
                return Err(ForecastError::OutputShape {
                    expected: 2,
                    found: raw.ncols(),
                });
            }
            raw.rows()
                .into_iter()
                .map(|row| [f64::from(row[0]), f64::from(row[1])])
                .collect()
        }
    };

    Ok(Forecast {
        bucket,
        points: accumulate(&deltas, origin),
    })
}
