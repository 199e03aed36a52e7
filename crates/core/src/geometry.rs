//! Mappings from grid coordinates to output space.
//!
//! The value a threshold is compared against (the field sample) is kept
//! separate from the position a crossing is interpolated in. A planar
//! [`GridGeometry`] places grid point `(i, j)` at `(i * w, j * h)`; a
//! [`TerrainGeometry`] lifts it to `(i * w, value * height, j * d)` so the
//! same contours can be drawn on a 3D height map.

use crate::error::ContourError;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// A point type that crossings can be interpolated in.
pub trait Position: Copy + Send + Sync {
    /// Linear interpolation: `self + t * (other - self)`.
    fn lerp(self, other: Self, t: f64) -> Self;

    /// Squared euclidean distance, used for endpoint matching.
    fn distance_squared(self, other: Self) -> f64;
}

impl Position for DVec2 {
    fn lerp(self, other: Self, t: f64) -> Self {
        DVec2::lerp(self, other, t)
    }

    fn distance_squared(self, other: Self) -> f64 {
        DVec2::distance_squared(self, other)
    }
}

impl Position for DVec3 {
    fn lerp(self, other: Self, t: f64) -> Self {
        DVec3::lerp(self, other, t)
    }

    fn distance_squared(self, other: Self) -> f64 {
        DVec3::distance_squared(self, other)
    }
}

/// Maps a grid point (and its sample) to an output position.
pub trait Geometry: Sync {
    type Point: Position;

    /// Output position of grid point `(i, j)` whose sample is `value`.
    fn position(&self, i: usize, j: usize, value: f64) -> Self::Point;
}

fn check_spacing(name: &str, value: f64) -> Result<(), ContourError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ContourError::InvalidGeometry(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

/// Axis-aligned planar grid with (possibly non-square) cells.
///
/// Deserialization goes through [`GridGeometry::new`], so bad spacing is
/// rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridGeometryRepr")]
pub struct GridGeometry {
    cell_width: f64,
    cell_height: f64,
    origin: DVec2,
}

impl GridGeometry {
    /// Creates a grid anchored at the origin.
    pub fn new(cell_width: f64, cell_height: f64) -> Result<Self, ContourError> {
        check_spacing("cell_width", cell_width)?;
        check_spacing("cell_height", cell_height)?;
        Ok(Self {
            cell_width,
            cell_height,
            origin: DVec2::ZERO,
        })
    }

    /// Unit cells, so output positions equal grid coordinates.
    pub fn unit() -> Self {
        Self {
            cell_width: 1.0,
            cell_height: 1.0,
            origin: DVec2::ZERO,
        }
    }

    /// Offsets every output position by `origin`.
    pub fn with_origin(mut self, origin: DVec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }
}

#[derive(Deserialize)]
struct GridGeometryRepr {
    cell_width: f64,
    cell_height: f64,
    #[serde(default)]
    origin: DVec2,
}

impl TryFrom<GridGeometryRepr> for GridGeometry {
    type Error = ContourError;

    fn try_from(repr: GridGeometryRepr) -> Result<Self, Self::Error> {
        Ok(Self::new(repr.cell_width, repr.cell_height)?.with_origin(repr.origin))
    }
}

impl Geometry for GridGeometry {
    type Point = DVec2;

    fn position(&self, i: usize, j: usize, _value: f64) -> DVec2 {
        self.origin + DVec2::new(i as f64 * self.cell_width, j as f64 * self.cell_height)
    }
}

/// Height-mapped terrain: x runs along columns, z along rows, and y is the
/// sample scaled by `height_scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TerrainGeometryRepr")]
pub struct TerrainGeometry {
    cell_width: f64,
    cell_depth: f64,
    height_scale: f64,
}

impl TerrainGeometry {
    /// `height_scale` may be negative (y-down renderers) but must be finite.
    pub fn new(cell_width: f64, cell_depth: f64, height_scale: f64) -> Result<Self, ContourError> {
        check_spacing("cell_width", cell_width)?;
        check_spacing("cell_depth", cell_depth)?;
        if !height_scale.is_finite() {
            return Err(ContourError::InvalidGeometry(format!(
                "height_scale must be finite, got {height_scale}"
            )));
        }
        Ok(Self {
            cell_width,
            cell_depth,
            height_scale,
        })
    }

    pub fn height_scale(&self) -> f64 {
        self.height_scale
    }
}

#[derive(Deserialize)]
struct TerrainGeometryRepr {
    cell_width: f64,
    cell_depth: f64,
    height_scale: f64,
}

impl TryFrom<TerrainGeometryRepr> for TerrainGeometry {
    type Error = ContourError;

    fn try_from(repr: TerrainGeometryRepr) -> Result<Self, Self::Error> {
        Self::new(repr.cell_width, repr.cell_depth, repr.height_scale)
    }
}

impl Geometry for TerrainGeometry {
    type Point = DVec3;

    fn position(&self, i: usize, j: usize, value: f64) -> DVec3 {
        DVec3::new(
            i as f64 * self.cell_width,
            value * self.height_scale,
            j as f64 * self.cell_depth,
        )
    }
}

/// Runtime choice of geometry, used by sketches to tell the host how their
/// field is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryKind {
    Planar(GridGeometry),
    Terrain(TerrainGeometry),
}
