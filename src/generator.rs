//! # Trace Generator
//!
//! Synthetic per-time-step intensity traces: a progressive random walk
//! along the fiber's distance axis, mapped through `abs(v) * 100` so all
//! samples are non-negative and comparable across traces.
//!
//! Each [`TraceGenerator::generate`] call owns its RNG and output buffer,
//! so invocations can run concurrently with no shared mutable state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::traces::Trace;

/// Scale factor applied to raw walk values before taking the absolute value.
const INTENSITY_SCALE: f64 = 100.0;

/// Errors produced by trace generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A trace must contain at least one point
    #[error("invalid point count: number_of_points must be > 0")]
    InvalidPointCount,

    /// The walk's step magnitude must be positive and finite
    #[error("invalid step magnitude: {0}")]
    InvalidStepMagnitude(f64),
}

/// Generator for one progressive random-walk intensity trace.
///
/// Mirrors the shape of a progressive XY data source: configure the number
/// of points, then call [`generate`](Self::generate) to produce one
/// immutable [`Trace`]. Without an explicit seed every call draws a fresh
/// entropy seed, so repeated calls yield independent traces.
#[derive(Debug, Clone)]
pub struct TraceGenerator {
    number_of_points: usize,
    step_magnitude: f64,
    seed: Option<u64>,
}

impl TraceGenerator {
    /// Create a generator producing `number_of_points` samples per trace.
    pub fn new(number_of_points: usize) -> Self {
        Self {
            number_of_points,
            step_magnitude: 1.0,
            seed: None,
        }
    }

    /// Set the maximum absolute increment of the underlying random walk.
    pub fn with_step_magnitude(mut self, step_magnitude: f64) -> Self {
        self.step_magnitude = step_magnitude;
        self
    }

    /// Fix the RNG seed for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate one trace.
    ///
    /// The raw walk accumulates signed increments in
    /// `[-step_magnitude, step_magnitude)`; each accumulated value is
    /// mapped through `abs(v) * 100` to yield a non-negative intensity.
    pub fn generate(&self) -> Result<Trace, GeneratorError> {
        if self.number_of_points == 0 {
            return Err(GeneratorError::InvalidPointCount);
        }
        if !(self.step_magnitude > 0.0 && self.step_magnitude.is_finite()) {
            return Err(GeneratorError::InvalidStepMagnitude(self.step_magnitude));
        }

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut samples = Vec::with_capacity(self.number_of_points);
        let mut walk = 0.0_f64;
        for _ in 0..self.number_of_points {
            walk += rng.gen_range(-self.step_magnitude..self.step_magnitude);
            samples.push((walk * INTENSITY_SCALE).abs());
        }
        Ok(samples)
    }
}
