//! Stitching loose segments into polylines.
//!
//! Marching squares emits one unordered segment per cell. Pen plotters and
//! path-based renderers want continuous strokes, so [`join_segments`] chains
//! segments whose endpoints coincide. Neighbouring cells interpolate their
//! shared edge identically, so matching endpoints are usually bit-equal and
//! a tiny tolerance suffices.

use crate::segment::{ContourSet, Segment};
use isoline_core::Position;
use serde::Serialize;
use std::collections::VecDeque;

/// Default endpoint matching tolerance in output units.
pub const JOIN_TOLERANCE: f64 = 1e-9;

/// A chain of connected points. A closed polyline repeats its first point
/// at the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline<P> {
    pub points: Vec<P>,
    pub closed: bool,
}

impl<P: Position> Polyline<P> {
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_squared(w[1]).sqrt())
            .sum()
    }
}

/// Finds the first unused segment touching `point`, returning its index and
/// its far endpoint.
fn find_attached<P: Position>(
    segments: &[Segment<P>],
    used: &[bool],
    point: P,
    tol2: f64,
) -> Option<(usize, P)> {
    segments
        .iter()
        .enumerate()
        .filter(|(idx, _)| !used[*idx])
        .find_map(|(idx, seg)| {
            if seg.start.distance_squared(point) <= tol2 {
                Some((idx, seg.end))
            } else if seg.end.distance_squared(point) <= tol2 {
                Some((idx, seg.start))
            } else {
                None
            }
        })
}

/// Chains segments sharing endpoints (within `tolerance`) into polylines.
///
/// Segments are consumed in input order, so the output is deterministic.
/// Each chain is grown at its tail first, then at its head. Quadratic in the
/// segment count; call it per level.
pub fn join_segments<P: Position>(segments: &[Segment<P>], tolerance: f64) -> Vec<Polyline<P>> {
    let tol2 = tolerance * tolerance;
    let mut used = vec![false; segments.len()];
    let mut polylines = Vec::new();

    for (start_idx, seed) in segments.iter().enumerate() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;
        let mut points = VecDeque::from([seed.start, seed.end]);

        while let Some(&tail) = points.back() {
            let Some((idx, next)) = find_attached(segments, &used, tail, tol2) else {
                break;
            };
            used[idx] = true;
            points.push_back(next);
        }
        while let Some(&head) = points.front() {
            let Some((idx, prev)) = find_attached(segments, &used, head, tol2) else {
                break;
            };
            used[idx] = true;
            points.push_front(prev);
        }

        let points: Vec<P> = points.into();
        let closed = points.len() > 3
            && points[0].distance_squared(points[points.len() - 1]) <= tol2;
        polylines.push(Polyline { points, closed });
    }

    polylines
}

/// Polylines of one threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineLevel<P> {
    pub threshold: f64,
    pub polylines: Vec<Polyline<P>>,
}

/// Joins each level of a contour set independently, keeping level order.
pub fn join_levels<P: Position>(set: &ContourSet<P>, tolerance: f64) -> Vec<PolylineLevel<P>> {
    set.levels()
        .iter()
        .map(|level| PolylineLevel {
            threshold: level.threshold,
            polylines: join_segments(&level.segments, tolerance),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment<DVec2> {
        Segment::new(DVec2::new(a.0, a.1), DVec2::new(b.0, b.1))
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(join_segments::<DVec2>(&[], JOIN_TOLERANCE).is_empty());
    }

    #[test]
    fn disjoint_segments_stay_separate() {
        let lines = join_segments(
            &[seg((0.0, 0.0), (1.0, 0.0)), seg((5.0, 5.0), (6.0, 5.0))],
            JOIN_TOLERANCE,
        );
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| !l.closed && l.points.len() == 2));
    }

    #[test]
    fn reversed_segments_are_chained() {
        let lines = join_segments(
            &[
                seg((1.0, 0.0), (2.0, 0.0)),
                seg((0.0, 0.0), (1.0, 0.0)),
                seg((3.0, 0.0), (2.0, 0.0)),
            ],
            JOIN_TOLERANCE,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].points,
            vec![
                DVec2::new(0.0, 0.0),
                DVec2::new(1.0, 0.0),
                DVec2::new(2.0, 0.0),
                DVec2::new(3.0, 0.0),
            ]
        );
        assert!(!lines[0].closed);
        assert_eq!(lines[0].length(), 3.0);
    }

    #[test]
    fn square_ring_is_closed() {
        let lines = join_segments(
            &[
                seg((0.0, 0.0), (1.0, 0.0)),
                seg((1.0, 1.0), (0.0, 1.0)),
                seg((1.0, 0.0), (1.0, 1.0)),
                seg((0.0, 1.0), (0.0, 0.0)),
            ],
            JOIN_TOLERANCE,
        );
        assert_eq!(lines.len(), 1);
        assert!(lines[0].closed);
        assert_eq!(lines[0].points.len(), 5);
        assert_eq!(lines[0].points.first(), lines[0].points.last());
        assert_eq!(lines[0].length(), 4.0);
    }

    #[test]
    fn join_levels_keeps_levels_apart() {
        use crate::segment::ContourLevel;
        // Both levels touch (1, 0); they must not be chained together.
        let set = ContourSet::new(vec![
            ContourLevel {
                threshold: 0.25,
                segments: vec![seg((0.0, 0.0), (1.0, 0.0))],
            },
            ContourLevel {
                threshold: 0.75,
                segments: vec![seg((1.0, 0.0), (2.0, 0.0))],
            },
        ]);
        let joined = join_levels(&set, JOIN_TOLERANCE);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[1].threshold, 0.75);
        assert!(joined.iter().all(|l| l.polylines.len() == 1));
        assert_eq!(joined[0].polylines[0].points.len(), 2);
    }

    #[test]
    fn tolerance_bridges_small_gaps() {
        let segments = [seg((0.0, 0.0), (1.0, 0.0)), seg((1.0 + 1e-6, 0.0), (2.0, 0.0))];
        assert_eq!(join_segments(&segments, JOIN_TOLERANCE).len(), 2);
        assert_eq!(join_segments(&segments, 1e-3).len(), 1);
    }
}
