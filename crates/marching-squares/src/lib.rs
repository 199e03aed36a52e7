#![deny(unsafe_code)]
//! Marching-squares contour extraction.
//!
//! Given a [`ScalarField`](isoline_core::ScalarField) sampled on a regular
//! grid and a list of thresholds, [`ContourExtractor`] produces, per
//! threshold, the line segments approximating that threshold's isoline.
//! Each cell is handled independently:
//!
//! 1. corners with `value >= threshold` are classified as above;
//! 2. every edge whose endpoints differ gets a linearly interpolated crossing;
//! 3. crossings are kept in edge order (top, right, bottom, left);
//! 4. two crossings form one segment, four crossings (a saddle) form two
//!    segments according to [`SaddleResolution`], anything else is dropped.
//!
//! Positions are produced by a [`Geometry`](isoline_core::Geometry), so the
//! same extraction serves flat contour maps and 3D terrain.

pub mod cache;
pub mod cell;
pub mod extract;
pub mod levels;
pub mod polyline;
pub mod segment;

pub use cache::ContourCache;
pub use cell::{interp, SaddleResolution};
pub use extract::ContourExtractor;
pub use levels::{levels, levels_between};
pub use polyline::{join_levels, join_segments, Polyline, PolylineLevel, JOIN_TOLERANCE};
pub use segment::{ContourLevel, ContourSet, Segment};
