//! Threshold stepping.
//!
//! `L` levels over a field normalized to `[0, 1]` are `l / L` for
//! `l = 0 .. L`: the lowest level is included and `1.0` is not.

use isoline_core::ContourError;

/// `count` evenly spaced thresholds over `[0, 1)`.
pub fn levels(count: usize) -> Vec<f64> {
    (0..count).map(|l| l as f64 / count as f64).collect()
}

/// `count` evenly spaced thresholds over `[min, max)`, same spacing rule as
/// [`levels`].
pub fn levels_between(min: f64, max: f64, count: usize) -> Result<Vec<f64>, ContourError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ContourError::InvalidParam {
            name: "range".into(),
            reason: format!("bounds must be finite, got [{min}, {max})"),
        });
    }
    if max < min {
        return Err(ContourError::InvalidParam {
            name: "range".into(),
            reason: format!("max {max} is below min {min}"),
        });
    }
    let span = max - min;
    if !span.is_finite() {
        return Err(ContourError::InvalidParam {
            name: "range".into(),
            reason: format!("range [{min}, {max}) is too wide to step"),
        });
    }
    Ok((0..count)
        .map(|l| min + span * (l as f64 / count as f64))
        .collect())
}

/// Rejects NaN and infinite thresholds, reporting the first offender.
pub fn validate_thresholds(thresholds: &[f64]) -> Result<(), ContourError> {
    match thresholds.iter().position(|t| !t.is_finite()) {
        Some(index) => Err(ContourError::NonFiniteThreshold {
            index,
            value: thresholds[index],
        }),
        None => Ok(()),
    }
}
