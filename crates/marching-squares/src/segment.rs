//! Output types: segments grouped by threshold level.

use isoline_core::Position;
use serde::Serialize;

/// A line segment between two interpolated edge crossings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment<P> {
    pub start: P,
    pub end: P,
}

impl<P> Segment<P> {
    pub fn new(start: P, end: P) -> Self {
        Self { start, end }
    }
}

impl<P: Position> Segment<P> {
    pub fn length(&self) -> f64 {
        self.start.distance_squared(self.end).sqrt()
    }
}

/// All segments produced for one threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourLevel<P> {
    pub threshold: f64,
    pub segments: Vec<Segment<P>>,
}

impl<P: Position> ContourLevel<P> {
    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }
}

/// Result of one extraction: one [`ContourLevel`] per input threshold, in
/// input order. Repeated thresholds produce repeated levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourSet<P> {
    levels: Vec<ContourLevel<P>>,
}

impl<P> ContourSet<P> {
    pub fn new(levels: Vec<ContourLevel<P>>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[ContourLevel<P>] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<ContourLevel<P>> {
        self.levels
    }

    /// Segments of the `index`-th threshold.
    pub fn level(&self, index: usize) -> Option<&ContourLevel<P>> {
        self.levels.get(index)
    }

    /// Total number of segments across all levels.
    pub fn segment_count(&self) -> usize {
        self.levels.iter().map(|l| l.segments.len()).sum()
    }

    /// True when no level produced a segment.
    pub fn is_empty(&self) -> bool {
        self.segment_count() == 0
    }

    /// Flattened `(threshold, segment)` pairs in level order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Segment<P>)> + '_ {
        self.levels
            .iter()
            .flat_map(|l| l.segments.iter().map(move |s| (l.threshold, s)))
    }
}
