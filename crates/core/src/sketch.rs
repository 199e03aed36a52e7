//! The `Sketch` trait every contour sketch implements.
//!
//! The trait is object-safe so the gallery can switch between sketches at
//! runtime through `dyn Sketch`.

use crate::error::ContourError;
use crate::field::ScalarField;
use crate::geometry::GeometryKind;
use serde_json::Value;

/// A frame-based producer of a scalar field plus the thresholds and
/// geometry its contours should be extracted with.
///
/// The sketch owns its field snapshot; extraction only ever borrows it.
pub trait Sketch {
    /// Advance one animation frame, resampling the field.
    ///
    /// Static sketches keep their field and return `Ok(())`.
    fn step(&mut self) -> Result<(), ContourError>;

    /// The current field snapshot.
    fn field(&self) -> &ScalarField;

    /// Threshold levels to contour, in drawing order.
    fn thresholds(&self) -> &[f64];

    /// How grid points map to output space.
    fn geometry(&self) -> GeometryKind;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Whether `step()` changes the field.
    fn is_animated(&self) -> bool {
        true
    }
}
