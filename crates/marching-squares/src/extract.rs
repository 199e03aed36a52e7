//! The contour extractor: marching squares over every cell for every
//! threshold.
//!
//! Extraction is a pure function of (field, thresholds, geometry, saddle
//! mode). It owns no state between calls and never mutates the field.
//! Cost is `O(cols * rows * thresholds)`.

use crate::cell::{cell_crossings, pair_crossings, SaddleResolution, BL, BR, TL, TR};
use crate::levels::validate_thresholds;
use crate::segment::{ContourLevel, ContourSet, Segment};
use isoline_core::{ContourError, Geometry, Position, ScalarField};
use rayon::prelude::*;

/// Extracts threshold isolines from a [`ScalarField`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContourExtractor {
    saddle: SaddleResolution,
}

/// Grid point positions computed once per extraction, shared by all levels.
struct PositionGrid<P> {
    stride: usize,
    points: Vec<P>,
}

impl<P: Copy> PositionGrid<P> {
    fn new<G: Geometry<Point = P>>(field: &ScalarField, geometry: &G) -> Self {
        Self {
            stride: field.cols() + 1,
            points: field
                .iter()
                .map(|(i, j, v)| geometry.position(i, j, v))
                .collect(),
        }
    }

    fn at(&self, i: usize, j: usize) -> P {
        self.points[j * self.stride + i]
    }
}

impl ContourExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saddle(mut self, saddle: SaddleResolution) -> Self {
        self.saddle = saddle;
        self
    }

    pub fn saddle(&self) -> SaddleResolution {
        self.saddle
    }

    /// Streams every segment as `(level_index, threshold, segment)`.
    ///
    /// Order is level by level, then row by row (`j`), then column by
    /// column (`i`); a saddle cell emits its two segments back to back.
    pub fn for_each_segment<G, F>(
        &self,
        field: &ScalarField,
        thresholds: &[f64],
        geometry: &G,
        mut emit: F,
    ) -> Result<(), ContourError>
    where
        G: Geometry,
        F: FnMut(usize, f64, Segment<G::Point>),
    {
        validate_thresholds(thresholds)?;
        if thresholds.is_empty() {
            return Ok(());
        }
        let grid = PositionGrid::new(field, geometry);
        for (level, &threshold) in thresholds.iter().enumerate() {
            for j in 0..field.rows() {
                self.march_row(field, &grid, j, threshold, |s| emit(level, threshold, s));
            }
        }
        Ok(())
    }

    /// Extracts all levels, one [`ContourLevel`] per threshold in input order.
    ///
    /// An empty threshold list yields an empty set. A non-finite threshold
    /// fails with `ContourError::NonFiniteThreshold` before any work is done.
    pub fn extract<G: Geometry>(
        &self,
        field: &ScalarField,
        thresholds: &[f64],
        geometry: &G,
    ) -> Result<ContourSet<G::Point>, ContourError> {
        let mut levels: Vec<ContourLevel<G::Point>> = thresholds
            .iter()
            .map(|&threshold| ContourLevel {
                threshold,
                segments: Vec::new(),
            })
            .collect();
        self.for_each_segment(field, thresholds, geometry, |level, _, segment| {
            levels[level].segments.push(segment);
        })?;
        let set = ContourSet::new(levels);
        tracing::debug!(
            cols = field.cols(),
            rows = field.rows(),
            levels = thresholds.len(),
            segments = set.segment_count(),
            saddle = %self.saddle,
            "extracted contours"
        );
        Ok(set)
    }

    /// Same result as [`extract`](Self::extract), with each level's rows
    /// split across the rayon thread pool.
    ///
    /// Rows are independent given the field and threshold; per-row results
    /// are concatenated in row order so the output is identical to the
    /// sequential path.
    pub fn extract_par<G: Geometry>(
        &self,
        field: &ScalarField,
        thresholds: &[f64],
        geometry: &G,
    ) -> Result<ContourSet<G::Point>, ContourError> {
        validate_thresholds(thresholds)?;
        if thresholds.is_empty() {
            return Ok(ContourSet::new(Vec::new()));
        }
        let grid = PositionGrid::new(field, geometry);
        let levels: Vec<ContourLevel<G::Point>> = thresholds
            .iter()
            .map(|&threshold| {
                let rows: Vec<Vec<Segment<G::Point>>> = (0..field.rows())
                    .into_par_iter()
                    .map(|j| {
                        let mut row = Vec::new();
                        self.march_row(field, &grid, j, threshold, |s| row.push(s));
                        row
                    })
                    .collect();
                ContourLevel {
                    threshold,
                    segments: rows.into_iter().flatten().collect(),
                }
            })
            .collect();
        let set = ContourSet::new(levels);
        tracing::debug!(
            cols = field.cols(),
            rows = field.rows(),
            levels = thresholds.len(),
            segments = set.segment_count(),
            saddle = %self.saddle,
            "extracted contours in parallel"
        );
        Ok(set)
    }

    /// Marches the cells of row `j` for one threshold.
    fn march_row<P, F>(
        &self,
        field: &ScalarField,
        grid: &PositionGrid<P>,
        j: usize,
        threshold: f64,
        mut emit: F,
    ) where
        P: Position,
        F: FnMut(Segment<P>),
    {
        for i in 0..field.cols() {
            let mut corners = [0.0; 4];
            corners[TL] = field.value(i, j);
            corners[TR] = field.value(i + 1, j);
            corners[BR] = field.value(i + 1, j + 1);
            corners[BL] = field.value(i, j + 1);

            let mut positions = [grid.at(i, j); 4];
            positions[TR] = grid.at(i + 1, j);
            positions[BR] = grid.at(i + 1, j + 1);
            positions[BL] = grid.at(i, j + 1);

            let crossings = cell_crossings(corners, positions, threshold);
            for segment in pair_crossings(crossings, corners, threshold, self.saddle)
                .into_iter()
                .flatten()
            {
                emit(segment);
            }
        }
    }
}
