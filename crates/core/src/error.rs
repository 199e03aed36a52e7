//! Error types for the isoline core.

use thiserror::Error;

/// Errors produced while building fields, configuring sketches, or
/// extracting contours.
#[derive(Debug, Error)]
pub enum ContourError {
    /// `cols` or `rows` was zero, or the sample count overflowed `usize`.
    #[error("invalid dimensions: cols and rows must be non-zero")]
    InvalidDimensions,

    /// A sample buffer did not hold `(cols + 1) * (rows + 1)` values.
    #[error("dimension mismatch: expected {expected} samples, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A sampler produced NaN or an infinity at grid point `(i, j)`.
    #[error("non-finite sample {value} at grid point ({i}, {j})")]
    NonFiniteSample { i: usize, j: usize, value: f64 },

    /// A threshold level was NaN or infinite.
    #[error("non-finite threshold {value} at index {index}")]
    NonFiniteThreshold { index: usize, value: f64 },

    /// A grid-to-space mapping had a non-positive or non-finite spacing.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A parameter had the right type but an unusable value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// No sketch is registered under the requested name.
    #[error("unknown sketch: {0}")]
    UnknownSketch(String),

    /// Writing or reading an artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}
