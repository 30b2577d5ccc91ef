//! Error types for the forecasting pipeline.

use thiserror::Error;

/// Problems with an inbound telemetry frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("expected {expected} sections, got {found}")]
    SectionCount { expected: usize, found: usize },

    #[error("{section}: expected {expected} fields, got {found}")]
    FieldCount {
        section: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{section}: invalid number {value:?}")]
    InvalidNumber { section: &'static str, value: String },

    #[error("npc list has {found} fields, not a multiple of {group}")]
    NpcGroup { found: usize, group: usize },

    #[error("{kind} doors: expected {expected} flags, got {found}")]
    DoorCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid look-ahead: {0}")]
    Lookahead(f64),
}

/// Errors raised while building features or producing a forecast.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("malformed frame: {0}")]
    Frame(#[from] FrameError),

    #[error("predictor for bucket {bucket} failed: {reason}")]
    Predictor { bucket: usize, reason: String },

    #[error("predictor output has {found} columns, expected {expected}")]
    OutputShape { expected: usize, found: usize },

    #[error("no model bucket fits {history} ticks of history")]
    NoBucket { history: usize },

    #[error("wall map {path}: {source}")]
    Layout {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type ForecastResult<T> = Result<T, ForecastError>;
