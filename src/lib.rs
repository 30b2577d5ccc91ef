//! Real-time feature pipeline and trajectory forecaster for shooter
//! telemetry streamed from a simulation.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;

pub use app::{run_app, RunStats};
pub use config::Config;
pub use error::{ForecastError, ForecastResult, FrameError};
pub use pipeline::{Session, TickOutput};
