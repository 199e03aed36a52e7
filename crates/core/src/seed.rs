//! Reproducible invocation of a sketch.
//!
//! A [`Seed`] captures everything needed to recreate a contour run:
//! sketch name, grid dimensions, parameters, noise seed, frame count and
//! saddle mode.

use crate::error::ContourError;
use crate::saddle::SaddleResolution;
use serde::{Deserialize, Serialize};

/// Reproducible specification for a contour run.
///
/// Two identical `Seed` values fed to the same binary produce bit-identical
/// segments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub sketch: String,
    pub cols: usize,
    pub rows: usize,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u32,
    #[serde(default = "one_frame")]
    pub frames: usize,
    #[serde(default)]
    pub saddle: SaddleResolution,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn one_frame() -> usize {
    1
}

impl Seed {
    /// Creates a new Seed with empty params, a single frame and the default
    /// saddle mode.
    pub fn new(sketch: &str, cols: usize, rows: usize, seed: u32) -> Self {
        Self {
            sketch: sketch.to_string(),
            cols,
            rows,
            params: empty_params(),
            seed,
            frames: one_frame(),
            saddle: SaddleResolution::default(),
        }
    }

    /// Validates that the grid is non-empty, that the sample count does not
    /// overflow, and that `params` is a JSON object.
    pub fn validate(&self) -> Result<(), ContourError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ContourError::InvalidDimensions);
        }
        let w = self.cols.checked_add(1).ok_or(ContourError::InvalidDimensions)?;
        let h = self.rows.checked_add(1).ok_or(ContourError::InvalidDimensions)?;
        w.checked_mul(h).ok_or(ContourError::InvalidDimensions)?;
        if !self.params.is_object() {
            return Err(ContourError::InvalidParam {
                name: "params".into(),
                reason: "must be a JSON object".into(),
            });
        }
        Ok(())
    }
}
