//! Scalar field sampled on the corners of a regular grid of cells.
//!
//! A `ScalarField` describing `cols x rows` cells stores
//! `(cols + 1) * (rows + 1)` finite f64 samples in row-major order, addressed
//! by column `i` in `[0, cols]` and row `j` in `[0, rows]`. Unlike a pixel
//! buffer there is no wrapping and no clamping: the values are whatever the
//! sampler produced, and contour thresholds are compared against them as-is.

use crate::error::ContourError;
use crate::source::ScalarSource;

/// A read-only snapshot of a sampled scalar field.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    cols: usize,
    rows: usize,
    data: Vec<f64>,
}

/// Number of samples needed for `cols x rows` cells, checking for overflow.
fn sample_count(cols: usize, rows: usize) -> Result<usize, ContourError> {
    if cols == 0 || rows == 0 {
        return Err(ContourError::InvalidDimensions);
    }
    let w = cols.checked_add(1).ok_or(ContourError::InvalidDimensions)?;
    let h = rows.checked_add(1).ok_or(ContourError::InvalidDimensions)?;
    w.checked_mul(h).ok_or(ContourError::InvalidDimensions)
}

impl ScalarField {
    /// Creates a zero-filled field of `cols x rows` cells.
    ///
    /// Returns `ContourError::InvalidDimensions` if either dimension is zero
    /// or if the sample count overflows `usize`.
    pub fn new(cols: usize, rows: usize) -> Result<Self, ContourError> {
        let len = sample_count(cols, rows)?;
        Ok(Self {
            cols,
            rows,
            data: vec![0.0; len],
        })
    }

    /// Creates a field from a row-major sample vector.
    ///
    /// `data` must hold exactly `(cols + 1) * (rows + 1)` finite values.
    pub fn from_data(cols: usize, rows: usize, data: Vec<f64>) -> Result<Self, ContourError> {
        let expected = sample_count(cols, rows)?;
        if data.len() != expected {
            return Err(ContourError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        if let Some(idx) = data.iter().position(|v| !v.is_finite()) {
            return Err(ContourError::NonFiniteSample {
                i: idx % (cols + 1),
                j: idx / (cols + 1),
                value: data[idx],
            });
        }
        Ok(Self { cols, rows, data })
    }

    /// Samples `f(i, j)` at every grid point.
    ///
    /// A non-finite sample is reported as `ContourError::NonFiniteSample`
    /// rather than being clamped or skipped.
    pub fn from_fn<F>(cols: usize, rows: usize, mut f: F) -> Result<Self, ContourError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self::try_from_fn(cols, rows, |i, j| {
            let value = f(i, j);
            if value.is_finite() {
                Ok(value)
            } else {
                Err(ContourError::NonFiniteSample { i, j, value })
            }
        })
    }

    /// Samples a fallible `f(i, j)` at every grid point.
    ///
    /// The first error returned by `f` is propagated unchanged. Sampling is
    /// row-major, so `f` sees `(0, 0), (1, 0), ...` in that order.
    pub fn try_from_fn<F, E>(cols: usize, rows: usize, mut f: F) -> Result<Self, E>
    where
        F: FnMut(usize, usize) -> Result<f64, E>,
        E: From<ContourError>,
    {
        let len = sample_count(cols, rows)?;
        let mut data = Vec::with_capacity(len);
        for j in 0..=rows {
            for i in 0..=cols {
                data.push(f(i, j)?);
            }
        }
        Ok(Self { cols, rows, data })
    }

    /// Fills a field from a [`ScalarSource`], sampling grid point `(i, j)`
    /// at `(i * scale, j * scale, time)`.
    pub fn sample(
        cols: usize,
        rows: usize,
        source: &dyn ScalarSource,
        scale: f64,
        time: f64,
    ) -> Result<Self, ContourError> {
        Self::from_fn(cols, rows, |i, j| {
            source.sample(i as f64 * scale, j as f64 * scale, time)
        })
    }

    /// Number of cells along x.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells along y.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Read-only access to the row-major samples.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sample at grid point `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i > cols` or `j > rows`.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        assert!(
            i <= self.cols && j <= self.rows,
            "grid point ({i}, {j}) outside {}x{} cells",
            self.cols,
            self.rows
        );
        self.data[j * (self.cols + 1) + i]
    }

    /// Sample at grid point `(i, j)`, or `None` outside the grid.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i <= self.cols && j <= self.rows).then(|| self.data[j * (self.cols + 1) + i])
    }

    /// Smallest and largest sample.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Iterates over all grid points yielding `(i, j, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let stride = self.cols + 1;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &v)| (idx % stride, idx / stride, v))
    }
}
