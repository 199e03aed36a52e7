//! Animated contours of drifting gradient noise.
//!
//! Time is the third noise coordinate; every `step()` advances it by `speed`
//! and resamples the whole field.

use crate::thresholds_from_json;
use isoline_core::params::{param_f64, param_string, require_finite, require_positive};
use isoline_core::source::{PerlinSource, SimplexSource};
use isoline_core::{ContourError, GeometryKind, GridGeometry, ScalarField, ScalarSource, Sketch};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

const DEFAULT_LEVELS: usize = 12;
const DEFAULT_SCALE: f64 = 0.08;
const DEFAULT_SPEED: f64 = 0.01;
const DEFAULT_CELL_SIZE: f64 = 8.0;

/// Which gradient noise drives the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseKind {
    #[default]
    Perlin,
    Simplex,
}

impl NoiseKind {
    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Perlin => "perlin",
            NoiseKind::Simplex => "simplex",
        }
    }

    fn source(self, frequency: f64, seed: u32) -> Box<dyn ScalarSource> {
        match self {
            NoiseKind::Perlin => Box::new(PerlinSource::new(frequency, seed)),
            NoiseKind::Simplex => Box::new(SimplexSource::new(frequency, seed)),
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseKind {
    type Err = ContourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "perlin" => Ok(NoiseKind::Perlin),
            "simplex" => Ok(NoiseKind::Simplex),
            other => Err(ContourError::InvalidParam {
                name: "noise".into(),
                reason: format!("expected perlin or simplex, got {other:?}"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoiseContoursParams {
    pub noise: NoiseKind,
    /// Noise frequency per grid step.
    pub scale: f64,
    /// Time advanced per frame.
    pub speed: f64,
    pub cell_size: f64,
    pub thresholds: Vec<f64>,
}

impl Default for NoiseContoursParams {
    fn default() -> Self {
        Self {
            noise: NoiseKind::default(),
            scale: DEFAULT_SCALE,
            speed: DEFAULT_SPEED,
            cell_size: DEFAULT_CELL_SIZE,
            thresholds: isoline_marching_squares::levels(DEFAULT_LEVELS),
        }
    }
}

impl NoiseContoursParams {
    pub fn from_json(params: &Value) -> Result<Self, ContourError> {
        Ok(Self {
            noise: param_string(params, "noise", NoiseKind::default().name())?.parse()?,
            scale: require_positive("scale", param_f64(params, "scale", DEFAULT_SCALE)?)?,
            speed: require_finite("speed", param_f64(params, "speed", DEFAULT_SPEED)?)?,
            cell_size: require_positive(
                "cell_size",
                param_f64(params, "cell_size", DEFAULT_CELL_SIZE)?,
            )?,
            thresholds: thresholds_from_json(params, DEFAULT_LEVELS)?,
        })
    }
}

pub struct NoiseContours {
    source: Box<dyn ScalarSource>,
    field: ScalarField,
    geometry: GridGeometry,
    params: NoiseContoursParams,
    time: f64,
    frame: u64,
}

impl NoiseContours {
    pub fn new(
        cols: usize,
        rows: usize,
        seed: u32,
        params: NoiseContoursParams,
    ) -> Result<Self, ContourError> {
        let source = params.noise.source(params.scale, seed);
        let field = ScalarField::sample(cols, rows, source.as_ref(), 1.0, 0.0)?;
        let geometry = GridGeometry::new(params.cell_size, params.cell_size)?;
        Ok(Self {
            source,
            field,
            geometry,
            params,
            time: 0.0,
            frame: 0,
        })
    }

    pub fn from_json(
        cols: usize,
        rows: usize,
        seed: u32,
        json_params: &Value,
    ) -> Result<Self, ContourError> {
        Self::new(cols, rows, seed, NoiseContoursParams::from_json(json_params)?)
    }

    /// Current noise time coordinate.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Sketch for NoiseContours {
    fn step(&mut self) -> Result<(), ContourError> {
        let time = self.time + self.params.speed;
        // Resample before committing so a failed frame leaves the sketch as it was.
        self.field = ScalarField::sample(
            self.field.cols(),
            self.field.rows(),
            self.source.as_ref(),
            1.0,
            time,
        )?;
        self.time = time;
        self.frame += 1;
        Ok(())
    }

    fn field(&self) -> &ScalarField {
        &self.field
    }

    fn thresholds(&self) -> &[f64] {
        &self.params.thresholds
    }

    fn geometry(&self) -> GeometryKind {
        GeometryKind::Planar(self.geometry)
    }

    fn params(&self) -> Value {
        json!({
            "noise": self.params.noise.name(),
            "scale": self.params.scale,
            "speed": self.params.speed,
            "cell_size": self.params.cell_size,
            "thresholds": self.params.thresholds,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "noise": {
                "type": "string",
                "default": NoiseKind::default().name(),
                "options": ["perlin", "simplex"],
                "description": "Gradient noise driving the field"
            },
            "levels": {
                "type": "integer",
                "default": DEFAULT_LEVELS,
                "min": 0,
                "description": "Number of evenly spaced thresholds l / levels over [0, 1)"
            },
            "thresholds": {
                "type": "array",
                "description": "Explicit threshold list; overrides levels"
            },
            "scale": {
                "type": "number",
                "default": DEFAULT_SCALE,
                "min": 0.0,
                "description": "Noise frequency per grid step"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": -1.0,
                "max": 1.0,
                "description": "Noise time advanced per frame"
            },
            "cell_size": {
                "type": "number",
                "default": DEFAULT_CELL_SIZE,
                "min": 0.0,
                "description": "Cell edge length in output units"
            }
        })
    }
}
