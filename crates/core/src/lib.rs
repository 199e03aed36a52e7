#![deny(unsafe_code)]
//! Core types and traits for isoline, a gallery of contour sketches.
//!
//! Provides the `ScalarField` sample grid, grid-to-space `Geometry` mappings
//! (planar and terrain), the saddle split mode, `ScalarSource` samplers (noise and analytic), the
//! `Sketch` trait, reproducible `Seed`, and parameter helpers.

pub mod error;
pub mod field;
pub mod geometry;
pub mod params;
pub mod saddle;
pub mod seed;
pub mod sketch;
pub mod source;

pub use error::ContourError;
pub use field::ScalarField;
pub use geometry::{Geometry, GeometryKind, GridGeometry, Position, TerrainGeometry};
pub use saddle::SaddleResolution;
pub use seed::Seed;
pub use sketch::Sketch;
pub use source::ScalarSource;
