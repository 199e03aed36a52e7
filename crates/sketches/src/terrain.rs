//! Fly-over terrain: a fractal height field whose contours are lifted into
//! 3D by [`TerrainGeometry`].
//!
//! `step()` scrolls the terrain toward the viewer by `speed` rows, so row `j`
//! is sampled at noise coordinate `(j - fly) * scale`.

use crate::thresholds_from_json;
use isoline_core::params::{param_f64, param_u32, require_finite, require_positive};
use isoline_core::source::FbmSource;
use isoline_core::{ContourError, GeometryKind, ScalarField, ScalarSource, Sketch, TerrainGeometry};
use serde_json::{json, Value};

const DEFAULT_LEVELS: usize = 8;
const DEFAULT_SCALE: f64 = 0.1;
const DEFAULT_OCTAVES: u32 = 3;
const DEFAULT_PERSISTENCE: f64 = 0.5;
const DEFAULT_HEIGHT: f64 = 120.0;
const DEFAULT_CELL_SIZE: f64 = 20.0;
const DEFAULT_SPEED: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct TerrainParams {
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    /// World-space height of a sample equal to 1.0.
    pub height: f64,
    pub cell_size: f64,
    /// Rows scrolled per frame.
    pub speed: f64,
    pub thresholds: Vec<f64>,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            speed: DEFAULT_SPEED,
            thresholds: isoline_marching_squares::levels(DEFAULT_LEVELS),
        }
    }
}

impl TerrainParams {
    pub fn from_json(params: &Value) -> Result<Self, ContourError> {
        Ok(Self {
            scale: require_positive("scale", param_f64(params, "scale", DEFAULT_SCALE)?)?,
            octaves: param_u32(params, "octaves", DEFAULT_OCTAVES)?,
            persistence: param_f64(params, "persistence", DEFAULT_PERSISTENCE)?,
            height: require_finite("height", param_f64(params, "height", DEFAULT_HEIGHT)?)?,
            cell_size: require_positive(
                "cell_size",
                param_f64(params, "cell_size", DEFAULT_CELL_SIZE)?,
            )?,
            speed: require_finite("speed", param_f64(params, "speed", DEFAULT_SPEED)?)?,
            thresholds: thresholds_from_json(params, DEFAULT_LEVELS)?,
        })
    }
}

pub struct Terrain {
    source: FbmSource,
    field: ScalarField,
    geometry: TerrainGeometry,
    params: TerrainParams,
    fly: f64,
}

impl Terrain {
    pub fn new(
        cols: usize,
        rows: usize,
        seed: u32,
        params: TerrainParams,
    ) -> Result<Self, ContourError> {
        let source = FbmSource::new(1.0, seed, params.octaves, params.persistence, 2.0);
        let geometry = TerrainGeometry::new(params.cell_size, params.cell_size, params.height)?;
        let field = height_field(cols, rows, &source, params.scale, 0.0)?;
        Ok(Self {
            source,
            field,
            geometry,
            params,
            fly: 0.0,
        })
    }

    pub fn from_json(
        cols: usize,
        rows: usize,
        seed: u32,
        json_params: &Value,
    ) -> Result<Self, ContourError> {
        Self::new(cols, rows, seed, TerrainParams::from_json(json_params)?)
    }

    /// Rows scrolled so far.
    pub fn fly(&self) -> f64 {
        self.fly
    }
}

fn height_field(
    cols: usize,
    rows: usize,
    source: &dyn ScalarSource,
    scale: f64,
    fly: f64,
) -> Result<ScalarField, ContourError> {
    ScalarField::from_fn(cols, rows, |i, j| {
        source.sample(i as f64 * scale, (j as f64 - fly) * scale, 0.0)
    })
}

impl Sketch for Terrain {
    fn step(&mut self) -> Result<(), ContourError> {
        let fly = self.fly + self.params.speed;
        self.field = height_field(
            self.field.cols(),
            self.field.rows(),
            &self.source,
            self.params.scale,
            fly,
        )?;
        self.fly = fly;
        Ok(())
    }

    fn field(&self) -> &ScalarField {
        &self.field
    }

    fn thresholds(&self) -> &[f64] {
        &self.params.thresholds
    }

    fn geometry(&self) -> GeometryKind {
        GeometryKind::Terrain(self.geometry)
    }

    fn params(&self) -> Value {
        json!({
            "scale": self.params.scale,
            "octaves": self.params.octaves,
            "persistence": self.params.persistence,
            "height": self.params.height,
            "cell_size": self.params.cell_size,
            "speed": self.params.speed,
            "thresholds": self.params.thresholds,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "levels": {
                "type": "integer",
                "default": DEFAULT_LEVELS,
                "min": 0,
                "description": "Number of evenly spaced height thresholds"
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
            "octaves": {
                "type": "integer",
                "default": DEFAULT_OCTAVES,
                "min": 1,
                "max": 8,
                "description": "Number of fractal noise octaves"
            },
            "persistence": {
                "type": "number",
                "default": DEFAULT_PERSISTENCE,
                "min": 0.0,
                "max": 1.0,
                "description": "Amplitude falloff per octave"
            },
            "height": {
                "type": "number",
                "default": DEFAULT_HEIGHT,
                "description": "World-space height of the highest sample"
            },
            "cell_size": {
                "type": "number",
                "default": DEFAULT_CELL_SIZE,
                "min": 0.0,
                "description": "Ground distance between neighbouring samples"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": 0.0,
                "max": 2.0,
                "description": "Rows scrolled per frame"
            }
        })
    }
}
