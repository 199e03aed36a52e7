//! Static 2D contour map of fractal noise.
//!
//! The field is sampled once at construction. `step()` is a no-op, so the
//! extracted contours are memoized in a [`ContourCache`] and repeated
//! requests cost nothing.

use crate::thresholds_from_json;
use isoline_core::params::{param_f64, param_u32, require_positive};
use isoline_core::source::FbmSource;
use isoline_core::{ContourError, GeometryKind, GridGeometry, ScalarField, Sketch};
use isoline_marching_squares::{ContourCache, ContourExtractor, ContourSet};
use glam::DVec2;
use serde_json::{json, Value};

const DEFAULT_LEVELS: usize = 10;
const DEFAULT_SCALE: f64 = 0.08;
const DEFAULT_OCTAVES: u32 = 4;
const DEFAULT_PERSISTENCE: f64 = 0.5;
const DEFAULT_LACUNARITY: f64 = 2.0;
const DEFAULT_CELL_SIZE: f64 = 10.0;

/// Tunable constants for [`ContourMap`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContourMapParams {
    /// Noise frequency per grid step.
    pub scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    /// Cell edge length in output units.
    pub cell_size: f64,
    pub thresholds: Vec<f64>,
}

impl Default for ContourMapParams {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
            cell_size: DEFAULT_CELL_SIZE,
            thresholds: isoline_marching_squares::levels(DEFAULT_LEVELS),
        }
    }
}

impl ContourMapParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing keys and rejecting mistyped or out-of-range values.
    pub fn from_json(params: &Value) -> Result<Self, ContourError> {
        Ok(Self {
            scale: require_positive("scale", param_f64(params, "scale", DEFAULT_SCALE)?)?,
            octaves: param_u32(params, "octaves", DEFAULT_OCTAVES)?,
            persistence: param_f64(params, "persistence", DEFAULT_PERSISTENCE)?,
            lacunarity: require_positive(
                "lacunarity",
                param_f64(params, "lacunarity", DEFAULT_LACUNARITY)?,
            )?,
            cell_size: require_positive(
                "cell_size",
                param_f64(params, "cell_size", DEFAULT_CELL_SIZE)?,
            )?,
            thresholds: thresholds_from_json(params, DEFAULT_LEVELS)?,
        })
    }
}

/// A single static frame of noise contours.
pub struct ContourMap {
    field: ScalarField,
    geometry: GridGeometry,
    params: ContourMapParams,
    cache: ContourCache<GridGeometry>,
}

impl ContourMap {
    /// Samples the noise field for `cols x rows` cells.
    ///
    /// Returns `ContourError::InvalidDimensions` if either dimension is zero.
    pub fn new(
        cols: usize,
        rows: usize,
        seed: u32,
        params: ContourMapParams,
    ) -> Result<Self, ContourError> {
        let source = FbmSource::new(
            params.scale,
            seed,
            params.octaves,
            params.persistence,
            params.lacunarity,
        );
        let field = ScalarField::sample(cols, rows, &source, 1.0, 0.0)?;
        let geometry = GridGeometry::new(params.cell_size, params.cell_size)?;
        Ok(Self {
            field,
            geometry,
            params,
            cache: ContourCache::new(),
        })
    }

    pub fn from_json(
        cols: usize,
        rows: usize,
        seed: u32,
        json_params: &Value,
    ) -> Result<Self, ContourError> {
        Self::new(cols, rows, seed, ContourMapParams::from_json(json_params)?)
    }

    /// Contours of the static field, extracted on first request.
    pub fn contours(
        &mut self,
        extractor: &ContourExtractor,
    ) -> Result<&ContourSet<DVec2>, ContourError> {
        self.cache
            .get_or_extract(extractor, &self.field, &self.params.thresholds, &self.geometry)
    }

    pub fn cache(&self) -> &ContourCache<GridGeometry> {
        &self.cache
    }
}

impl Sketch for ContourMap {
    fn step(&mut self) -> Result<(), ContourError> {
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
            "scale": self.params.scale,
            "octaves": self.params.octaves,
            "persistence": self.params.persistence,
            "lacunarity": self.params.lacunarity,
            "cell_size": self.params.cell_size,
            "thresholds": self.params.thresholds,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
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
            "lacunarity": {
                "type": "number",
                "default": DEFAULT_LACUNARITY,
                "min": 1.0,
                "max": 4.0,
                "description": "Frequency growth per octave"
            },
            "cell_size": {
                "type": "number",
                "default": DEFAULT_CELL_SIZE,
                "min": 0.0,
                "description": "Cell edge length in output units"
            }
        })
    }

    fn is_animated(&self) -> bool {
        false
    }
}
