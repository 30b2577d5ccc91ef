//! Trajectory predictors and the dispatcher that chooses between them.
//!
//! The trained sequence models are opaque: each takes six stacked
//! time-series channels and returns per-step `(dx, dy)` deltas in cells.
//! Which model runs depends on how much history is available and how far
//! ahead the simulation asked to look.
//!
//! ```text
//! history ──► bucket ──┬─ 0        ─► constant velocity
//!                      └─ 5/10/20  ─► ModelInput ─► Predictor
//!                                                     │
//!            forecast ◄── cumulative sum × cell size ◄┘
//! ```

mod dispatch;

pub use dispatch::{
    accumulate, constant_velocity, forecast, select_bucket, Bucket, Forecast,
};

use ndarray::Array2;

use crate::error::ForecastResult;
use crate::pipeline::grids::BinaryGrid;
use crate::pipeline::memory::{FeatureHistory, HistoryBuffer};

/// Six parallel `(timesteps, features)` channels for one prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelInput {
    /// `(T, 2)` displacements in cells
    pub displacement: Array2<f32>,
    /// `(T, 441)` flattened wall crops
    pub walls: Array2<f32>,
    /// `(T, 400)` flattened polar grids
    pub open_doors: Array2<f32>,
    pub closed_doors: Array2<f32>,
    pub alive_npcs: Array2<f32>,
    pub dead_npcs: Array2<f32>,
    /// Number of future steps the caller wants back
    pub horizon: usize,
}

impl ModelInput {
    /// Stacks the newest `window` ticks of every channel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_history(history: &FeatureHistory, window: usize, horizon: usize) -> Self {
        let steps: Vec<[f64; 2]> = history.displacements.recent(window).copied().collect();
        let displacement = Array2::from_shape_fn((steps.len(), 2), |(t, k)| steps[t][k] as f32);

        Self {
            displacement,
            walls: stack_grids(&history.walls, window),
            open_doors: stack_grids(&history.open_doors, window),
            closed_doors: stack_grids(&history.closed_doors, window),
            alive_npcs: stack_grids(&history.alive_npcs, window),
            dead_npcs: stack_grids(&history.dead_npcs, window),
            horizon,
        }
    }

    #[must_use]
    pub fn timesteps(&self) -> usize {
        self.displacement.nrows()
    }

    /// Channels in the order the models were trained with.
    #[must_use]
    pub fn channels(&self) -> [&Array2<f32>; 6] {
        [
            &self.displacement,
            &self.walls,
            &self.open_doors,
            &self.closed_doors,
            &self.alive_npcs,
            &self.dead_npcs,
        ]
    }
}

fn stack_grids<const W: usize, const H: usize>(
    buffer: &HistoryBuffer<BinaryGrid<W, H>>,
    window: usize,
) -> Array2<f32> {
    let frames: Vec<&BinaryGrid<W, H>> = buffer.recent(window).collect();
    let mut stacked = Array2::<f32>::zeros((frames.len(), W * H));
    for (mut row, grid) in stacked.rows_mut().into_iter().zip(&frames) {
        for (slot, value) in row.iter_mut().zip(grid.flatten()) {
            *slot = f32::from(value);
        }
    }
    stacked
}

/// A trained trajectory model.
pub trait Predictor {
    /// Returns a `(steps, 2)` tensor of per-step deltas in cells.
    fn predict(&self, input: &ModelInput) -> ForecastResult<Array2<f32>>;
}

impl<F> Predictor for F
where
    F: Fn(&ModelInput) -> ForecastResult<Array2<f32>>,
{
    fn predict(&self, input: &ModelInput) -> ForecastResult<Array2<f32>> {
        self(input)
    }
}

/// Stand-in used when no trained artifacts are available: extrapolates the
/// displacement channel at constant velocity.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantVelocity;

impl Predictor for ConstantVelocity {
    #[allow(clippy::cast_possible_truncation)]
    fn predict(&self, input: &ModelInput) -> ForecastResult<Array2<f32>> {
        let steps: Vec<[f64; 2]> = input
            .displacement
            .rows()
            .into_iter()
            .map(|row| [f64::from(row[0]), f64::from(row[1])])
            .collect();
        let deltas = constant_velocity(&steps, input.horizon);
        Ok(Array2::from_shape_fn((deltas.len(), 2), |(i, k)| {
            deltas[i][k] as f32
        }))
    }
}

/// The predictors for the three trained buckets.
pub struct ModelSet {
    short: Box<dyn Predictor>,
    medium: Box<dyn Predictor>,
    long: Box<dyn Predictor>,
}

impl ModelSet {
    #[must_use]
    pub fn new(
        short: Box<dyn Predictor>,
        medium: Box<dyn Predictor>,
        long: Box<dyn Predictor>,
    ) -> Self {
        Self { short, medium, long }
    }

    /// Every bucket served by [`ConstantVelocity`].
    #[must_use]
    pub fn constant_velocity() -> Self {
        Self::new(
            Box::new(ConstantVelocity),
            Box::new(ConstantVelocity),
            Box::new(ConstantVelocity),
        )
    }

    /// The predictor for a trained bucket; `None` for the fallback bucket.
    #[must_use]
    pub fn get(&self, bucket: Bucket) -> Option<&dyn Predictor> {
        match bucket {
            Bucket::Fallback => None,
            Bucket::Short => Some(self.short.as_ref()),
            Bucket::Medium => Some(self.medium.as_ref()),
            Bucket::Long => Some(self.long.as_ref()),
        }
    }
}
