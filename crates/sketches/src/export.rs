//! JSON export of extracted contours.
//!
//! A run produces one [`Frame`] per animation step. Frames serialize with
//! the sketch name, saddle mode and geometry so a plotter or renderer can
//! consume them without knowing which sketch produced them.

use crate::{SketchContours, SketchKind, SketchPolylines};
use isoline_core::{ContourError, GeometryKind, SaddleResolution, Seed, Sketch};
use isoline_marching_squares::ContourExtractor;
use serde::Serialize;
use std::path::Path;

/// Contours of a single frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub sketch: String,
    pub frame: usize,
    pub saddle: SaddleResolution,
    pub geometry: GeometryKind,
    pub contours: SketchContours,
    /// Joined polylines, present when the run asked for them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polylines: Option<SketchPolylines>,
}

/// Options for [`render_frames`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub extractor: ContourExtractor,
    /// Split rows across the rayon pool.
    pub parallel: bool,
    /// Join tolerance; `None` skips polyline stitching.
    pub join: Option<f64>,
}

/// Extracts `frames` consecutive frames. The first frame is the sketch's
/// current state; each later frame follows one `step()`.
pub fn render_frames(
    sketch: &mut SketchKind,
    frames: usize,
    options: &RenderOptions,
) -> Result<Vec<Frame>, ContourError> {
    let mut out = Vec::with_capacity(frames);
    for frame in 0..frames {
        if frame > 0 {
            sketch.step()?;
        }
        let contours = sketch.contours(&options.extractor, options.parallel)?;
        let polylines = options.join.map(|tolerance| contours.join(tolerance));
        tracing::debug!(
            sketch = sketch.name(),
            frame,
            segments = contours.segment_count(),
            "frame extracted"
        );
        out.push(Frame {
            sketch: sketch.name().to_string(),
            frame,
            saddle: options.extractor.saddle(),
            geometry: sketch.geometry(),
            contours,
            polylines,
        });
    }
    Ok(out)
}

/// Builds the sketch a [`Seed`] describes and extracts its frames with the
/// seed's saddle mode. Equal seeds give equal frames.
pub fn render_seed(
    seed: &Seed,
    parallel: bool,
    join: Option<f64>,
) -> Result<Vec<Frame>, ContourError> {
    let mut sketch = SketchKind::from_seed(seed)?;
    let options = RenderOptions {
        extractor: ContourExtractor::new().with_saddle(seed.saddle),
        parallel,
        join,
    };
    render_frames(&mut sketch, seed.frames, &options)
}

/// Serializes frames as pretty-printed JSON.
pub fn to_json(frames: &[Frame]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(frames)
}

/// Writes frames as JSON to `path`.
///
/// Returns `ContourError::Io` on serialization or write failure.
pub fn write_json(frames: &[Frame], path: &Path) -> Result<(), ContourError> {
    let json = to_json(frames).map_err(|e| ContourError::Io(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| ContourError::Io(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), frames = frames.len(), "contours written");
    Ok(())
}
