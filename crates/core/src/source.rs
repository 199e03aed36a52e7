//! Scalar sources: deterministic samplers that populate a [`ScalarField`].
//!
//! A [`ScalarSource`] returns one value at any point in space and time.
//! Noise sources (Perlin, Simplex, fractal Brownian motion) are remapped to
//! `[0, 1]` so that evenly spaced thresholds `l / L` cover them. Analytic
//! sources (ramp, pyramid) exist for reproducible demos and tests, and
//! [`CompositeSource`] sums any of the above.
//!
//! [`ScalarField`]: crate::field::ScalarField

use noise::{NoiseFn, OpenSimplex, Perlin};

/// A sampler of scalar values.
///
/// All implementations must be deterministic: same inputs = same output.
pub trait ScalarSource: Send + Sync {
    /// Sample the source at position (x, y) at the given time.
    fn sample(&self, x: f64, y: f64, time: f64) -> f64;
}

/// Maps a noise value in `[-1, 1]` to `[0, 1]`.
///
/// The `noise` crate's Perlin can overshoot its nominal range slightly, so
/// the result is clamped.
fn unit_range(n: f64) -> f64 {
    (0.5 + 0.5 * n).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Noise-based sources
// ---------------------------------------------------------------------------

/// Perlin noise in `[0, 1]`, with time as the third noise dimension.
pub struct PerlinSource {
    noise: Perlin,
    frequency: f64,
}

impl PerlinSource {
    pub fn new(frequency: f64, seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
            frequency,
        }
    }
}

impl ScalarSource for PerlinSource {
    fn sample(&self, x: f64, y: f64, time: f64) -> f64 {
        unit_range(
            self.noise
                .get([x * self.frequency, y * self.frequency, time]),
        )
    }
}

/// OpenSimplex noise in `[0, 1]`, same pattern as [`PerlinSource`].
pub struct SimplexSource {
    noise: OpenSimplex,
    frequency: f64,
}

impl SimplexSource {
    pub fn new(frequency: f64, seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            frequency,
        }
    }
}

impl ScalarSource for SimplexSource {
    fn sample(&self, x: f64, y: f64, time: f64) -> f64 {
        unit_range(
            self.noise
                .get([x * self.frequency, y * self.frequency, time]),
        )
    }
}

/// Fractal Brownian motion: octaves of Perlin noise summed with decaying
/// amplitude, normalized by the total amplitude and mapped to `[0, 1]`.
pub struct FbmSource {
    noise: Perlin,
    frequency: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
}

impl FbmSource {
    /// `octaves == 0` is treated as a single octave.
    pub fn new(frequency: f64, seed: u32, octaves: u32, persistence: f64, lacunarity: f64) -> Self {
        Self {
            noise: Perlin::new(seed),
            frequency,
            octaves: octaves.max(1),
            persistence,
            lacunarity,
        }
    }
}

impl ScalarSource for FbmSource {
    fn sample(&self, x: f64, y: f64, time: f64) -> f64 {
        let (total, norm, _, _) = (0..self.octaves).fold(
            (0.0, 0.0, 1.0, self.frequency),
            |(total, norm, amp, freq), _| {
                (
                    total + self.noise.get([x * freq, y * freq, time]) * amp,
                    norm + amp,
                    amp * self.persistence,
                    freq * self.lacunarity,
                )
            },
        );
        if norm.abs() < f64::EPSILON {
            return 0.5;
        }
        unit_range(total / norm)
    }
}

// ---------------------------------------------------------------------------
// Analytic sources
// ---------------------------------------------------------------------------

/// Linear ramp `a * x + b * y + c`. Time is ignored.
#[derive(Debug, Clone, Copy)]
pub struct RampSource {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl RampSource {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

impl ScalarSource for RampSource {
    fn sample(&self, x: f64, y: f64, _time: f64) -> f64 {
        self.a * x + self.b * y + self.c
    }
}

/// Square pyramid: `peak` at `(cx, cy)` falling linearly to zero at
/// Chebyshev distance `radius`, zero beyond.
#[derive(Debug, Clone, Copy)]
pub struct PyramidSource {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub peak: f64,
}

impl ScalarSource for PyramidSource {
    fn sample(&self, x: f64, y: f64, _time: f64) -> f64 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let d = (x - self.cx).abs().max((y - self.cy).abs());
        self.peak * (1.0 - d / self.radius).max(0.0)
    }
}

/// Sums the values of multiple sources.
#[derive(Default)]
pub struct CompositeSource {
    sources: Vec<Box<dyn ScalarSource>>,
}

impl CompositeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source to the composite (builder pattern).
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, source: Box<dyn ScalarSource>) -> Self {
        self.sources.push(source);
        self
    }
}

impl ScalarSource for CompositeSource {
    fn sample(&self, x: f64, y: f64, time: f64) -> f64 {
        self.sources.iter().map(|s| s.sample(x, y, time)).sum()
    }
}
