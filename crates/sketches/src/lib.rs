#![deny(unsafe_code)]
//! Sketch registry: maps sketch names to implementations and extracts their
//! contours.
//!
//! This crate sits between `isoline-core` (which defines the `Sketch` trait),
//! `isoline-marching-squares` (which does the extraction) and the CLI, so the
//! dispatch logic lives in one place.

pub mod contour_map;
pub mod export;
pub mod noise_contours;
pub mod terrain;

use glam::{DVec2, DVec3};
use isoline_core::params::{param_f64_list, param_usize};
use isoline_core::{ContourError, GeometryKind, ScalarField, Seed, Sketch};
use isoline_marching_squares::{join_levels, ContourExtractor, ContourSet, PolylineLevel};
use serde::Serialize;
use serde_json::Value;

pub use contour_map::ContourMap;
pub use noise_contours::NoiseContours;
pub use terrain::Terrain;

/// All available sketch names.
const SKETCH_NAMES: &[&str] = &["contour-map", "noise-contours", "terrain"];

/// Reads the threshold list shared by every sketch: an explicit `thresholds`
/// array wins, otherwise `levels` evenly spaced values over `[0, 1)`.
pub(crate) fn thresholds_from_json(
    params: &Value,
    default_levels: usize,
) -> Result<Vec<f64>, ContourError> {
    match param_f64_list(params, "thresholds")? {
        Some(explicit) => Ok(explicit),
        None => Ok(isoline_marching_squares::levels(param_usize(
            params,
            "levels",
            default_levels,
        )?)),
    }
}

/// Enumeration of all contour sketches in the gallery.
///
/// Use [`SketchKind::from_name`] for string-based construction.
pub enum SketchKind {
    /// Static fractal-noise contour map.
    ContourMap(ContourMap),
    /// Animated Perlin or Simplex contours.
    NoiseContours(NoiseContours),
    /// Scrolling 3D terrain contours.
    Terrain(Terrain),
}

impl SketchKind {
    /// Constructs a sketch by name.
    ///
    /// Returns `ContourError::UnknownSketch` if the name is not recognized.
    pub fn from_name(
        name: &str,
        cols: usize,
        rows: usize,
        seed: u32,
        params: &Value,
    ) -> Result<Self, ContourError> {
        match name {
            "contour-map" => Ok(SketchKind::ContourMap(ContourMap::from_json(
                cols, rows, seed, params,
            )?)),
            "noise-contours" => Ok(SketchKind::NoiseContours(NoiseContours::from_json(
                cols, rows, seed, params,
            )?)),
            "terrain" => Ok(SketchKind::Terrain(Terrain::from_json(
                cols, rows, seed, params,
            )?)),
            _ => Err(ContourError::UnknownSketch(name.to_string())),
        }
    }

    /// Constructs the sketch a [`Seed`] describes, after validating it.
    pub fn from_seed(seed: &Seed) -> Result<Self, ContourError> {
        seed.validate()?;
        Self::from_name(&seed.sketch, seed.cols, seed.rows, seed.seed, &seed.params)
    }

    /// Returns a slice of all recognized sketch names.
    pub fn list_sketches() -> &'static [&'static str] {
        SKETCH_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            SketchKind::ContourMap(_) => "contour-map",
            SketchKind::NoiseContours(_) => "noise-contours",
            SketchKind::Terrain(_) => "terrain",
        }
    }

    /// Extracts the current frame's contours. The static contour map serves
    /// repeated requests from its cache.
    pub fn contours(
        &mut self,
        extractor: &ContourExtractor,
        parallel: bool,
    ) -> Result<SketchContours, ContourError> {
        match self {
            SketchKind::ContourMap(s) => Ok(SketchContours::Planar(s.contours(extractor)?.clone())),
            SketchKind::NoiseContours(s) => extract_contours(&*s, extractor, parallel),
            SketchKind::Terrain(s) => extract_contours(&*s, extractor, parallel),
        }
    }
}

impl Sketch for SketchKind {
    fn step(&mut self) -> Result<(), ContourError> {
        match self {
            SketchKind::ContourMap(s) => s.step(),
            SketchKind::NoiseContours(s) => s.step(),
            SketchKind::Terrain(s) => s.step(),
        }
    }

    fn field(&self) -> &ScalarField {
        match self {
            SketchKind::ContourMap(s) => s.field(),
            SketchKind::NoiseContours(s) => s.field(),
            SketchKind::Terrain(s) => s.field(),
        }
    }

    fn thresholds(&self) -> &[f64] {
        match self {
            SketchKind::ContourMap(s) => s.thresholds(),
            SketchKind::NoiseContours(s) => s.thresholds(),
            SketchKind::Terrain(s) => s.thresholds(),
        }
    }

    fn geometry(&self) -> GeometryKind {
        match self {
            SketchKind::ContourMap(s) => s.geometry(),
            SketchKind::NoiseContours(s) => s.geometry(),
            SketchKind::Terrain(s) => s.geometry(),
        }
    }

    fn params(&self) -> Value {
        match self {
            SketchKind::ContourMap(s) => s.params(),
            SketchKind::NoiseContours(s) => s.params(),
            SketchKind::Terrain(s) => s.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            SketchKind::ContourMap(s) => s.param_schema(),
            SketchKind::NoiseContours(s) => s.param_schema(),
            SketchKind::Terrain(s) => s.param_schema(),
        }
    }

    fn is_animated(&self) -> bool {
        match self {
            SketchKind::ContourMap(s) => s.is_animated(),
            SketchKind::NoiseContours(s) => s.is_animated(),
            SketchKind::Terrain(s) => s.is_animated(),
        }
    }
}

/// Contours of one frame, in the output space of the sketch's geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "space", rename_all = "snake_case")]
pub enum SketchContours {
    Planar(ContourSet<DVec2>),
    Terrain(ContourSet<DVec3>),
}

impl SketchContours {
    pub fn segment_count(&self) -> usize {
        match self {
            SketchContours::Planar(set) => set.segment_count(),
            SketchContours::Terrain(set) => set.segment_count(),
        }
    }

    pub fn level_count(&self) -> usize {
        match self {
            SketchContours::Planar(set) => set.levels().len(),
            SketchContours::Terrain(set) => set.levels().len(),
        }
    }

    /// Stitches every level into polylines.
    pub fn join(&self, tolerance: f64) -> SketchPolylines {
        match self {
            SketchContours::Planar(set) => SketchPolylines::Planar(join_levels(set, tolerance)),
            SketchContours::Terrain(set) => SketchPolylines::Terrain(join_levels(set, tolerance)),
        }
    }
}

/// Polylines of one frame, per level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "space", content = "levels", rename_all = "snake_case")]
pub enum SketchPolylines {
    Planar(Vec<PolylineLevel<DVec2>>),
    Terrain(Vec<PolylineLevel<DVec3>>),
}

/// Extracts the contours of any sketch's current field with the geometry it
/// declares. `parallel` splits rows across the rayon pool; the result is the
/// same either way.
pub fn extract_contours(
    sketch: &dyn Sketch,
    extractor: &ContourExtractor,
    parallel: bool,
) -> Result<SketchContours, ContourError> {
    let field = sketch.field();
    let thresholds = sketch.thresholds();
    match sketch.geometry() {
        GeometryKind::Planar(g) => {
            let set = if parallel {
                extractor.extract_par(field, thresholds, &g)?
            } else {
                extractor.extract(field, thresholds, &g)?
            };
            Ok(SketchContours::Planar(set))
        }
        GeometryKind::Terrain(g) => {
            let set = if parallel {
                extractor.extract_par(field, thresholds, &g)?
            } else {
                extractor.extract(field, thresholds, &g)?
            };
            Ok(SketchContours::Terrain(set))
        }
    }
}
