//! Per-cell marching squares: edge crossings and how they pair into segments.
//!
//! Corners are indexed `TL = 0, TR = 1, BR = 2, BL = 3`; edges are indexed
//! `top = 0, right = 1, bottom = 2, left = 3`, and crossings are always kept
//! in that edge order. Each edge is interpolated in increasing grid
//! direction (left to right, top to bottom), so the shared edge of two
//! neighbouring cells yields a bit-identical crossing in both.

use crate::segment::Segment;
use isoline_core::Position;

pub use isoline_core::SaddleResolution;

pub const TL: usize = 0;
pub const TR: usize = 1;
pub const BR: usize = 2;
pub const BL: usize = 3;

/// Corner pairs of the top, right, bottom and left edges.
pub const EDGE_CORNERS: [(usize, usize); 4] = [(TL, TR), (TR, BR), (BL, BR), (TL, BL)];

/// Denominator substituted for a near-zero edge delta.
pub const INTERP_EPSILON: f64 = 1e-9;

/// Position where the field crosses `threshold` along the edge from `p1`
/// (sample `v1`) to `p2` (sample `v2`).
///
/// If `|v2 - v1| < INTERP_EPSILON` the delta is replaced by
/// `INTERP_EPSILON` with the same sign. On a genuine crossing
/// `|threshold - v1| <= |v2 - v1|`, so the result stays on the edge.
pub fn interp<P: Position>(v1: f64, v2: f64, p1: P, p2: P, threshold: f64) -> P {
    let delta = v2 - v1;
    let denom = if delta.abs() < INTERP_EPSILON {
        INTERP_EPSILON.copysign(delta)
    } else {
        delta
    };
    p1.lerp(p2, (threshold - v1) / denom)
}

/// A corner counts as above when `value >= threshold`.
pub fn is_above(value: f64, threshold: f64) -> bool {
    value >= threshold
}

/// Crossings on the four edges of one cell, in edge order.
pub fn cell_crossings<P: Position>(
    corners: [f64; 4],
    positions: [P; 4],
    threshold: f64,
) -> [Option<P>; 4] {
    let above = corners.map(|v| is_above(v, threshold));
    let mut crossings = [None; 4];
    for (edge, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
        if above[a] != above[b] {
            crossings[edge] = Some(interp(
                corners[a],
                corners[b],
                positions[a],
                positions[b],
                threshold,
            ));
        }
    }
    crossings
}

/// Pairs a cell's crossings into at most two segments.
///
/// - 2 crossings: one segment, first crossing to second in edge order.
/// - 4 crossings: two segments, chosen by `saddle`.
/// - 0, 1 or 3 crossings: nothing. A single crossing is degenerate and
///   dropped; consistent `>=` classification never produces an odd count
///   from finite samples.
pub fn pair_crossings<P: Position>(
    crossings: [Option<P>; 4],
    corners: [f64; 4],
    threshold: f64,
    saddle: SaddleResolution,
) -> [Option<Segment<P>>; 2] {
    if let [Some(top), Some(right), Some(bottom), Some(left)] = crossings {
        return match saddle {
            SaddleResolution::EdgeOrder => [
                Some(Segment::new(top, right)),
                Some(Segment::new(bottom, left)),
            ],
            SaddleResolution::CenterAverage => {
                // Scale before summing so large finite corners cannot overflow.
                let center = corners.iter().map(|v| v * 0.25).sum::<f64>();
                if is_above(center, threshold) == is_above(corners[TL], threshold) {
                    // TL and BR connect through the center; TR and BL are isolated.
                    [
                        Some(Segment::new(top, right)),
                        Some(Segment::new(bottom, left)),
                    ]
                } else {
                    [
                        Some(Segment::new(left, top)),
                        Some(Segment::new(right, bottom)),
                    ]
                }
            }
        };
    }

    let mut found = crossings.into_iter().flatten();
    match (found.next(), found.next(), found.next()) {
        (Some(a), Some(b), None) => [Some(Segment::new(a, b)), None],
        _ => [None, None],
    }
}
