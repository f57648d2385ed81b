//! # Trace Set Builder
//!
//! A [`TraceSet`] is the 2-D measurement body of a run: one [`Trace`] per
//! time step, every trace the same length. Construction enforces
//! rectangularity so downstream consumers (profile aggregation, heat map
//! binding) can rely on the shape invariant.
//!
//! [`TraceSetBuilder`] fans generation out across the rayon thread pool,
//! one task per time step, and joins in submission order: row `i` of the
//! result is always the `i`-th invocation, regardless of completion order.
//! Any task failure (or cancellation) surfaces as a single aggregate error
//! with no partial set observable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::SensingConfig;
use crate::generator::{GeneratorError, TraceGenerator};

/// One time-slice's intensity readings across the full distance axis.
pub type Trace = Vec<f64>;

/// Errors produced by trace-set construction
#[derive(Debug, thiserror::Error)]
pub enum TraceSetError {
    /// Rows of a trace set must all have the same length
    #[error("shape mismatch: row {row} has {actual} samples, expected {expected}")]
    ShapeMismatch {
        /// Index of the offending row
        row: usize,
        /// Length of row 0
        expected: usize,
        /// Length of the offending row
        actual: usize,
    },

    /// A trace set must contain at least one trace
    #[error("trace set must contain at least one trace")]
    Empty,

    /// One or more generation tasks failed; no partial set is retained
    #[error("trace generation failed: {0}")]
    GenerationFailed(#[from] GeneratorError),

    /// The build was cancelled before all tasks completed
    #[error("trace generation cancelled")]
    Cancelled,
}

/// Cooperative cancellation handle for a pending build.
///
/// Clone it, hand one clone to the builder, keep the other; calling
/// [`cancel`](Self::cancel) makes the build fail atomically with
/// [`TraceSetError::Cancelled`] instead of leaking pending work.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of any build holding a clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Ordered, rectangular, immutable collection of traces.
///
/// Row `i` corresponds to `time_start + i * time_step`; insertion order is
/// generation order is time order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TraceSet {
    rows: Vec<Trace>,
}

impl TraceSet {
    /// Wrap pre-built rows, enforcing the rectangularity invariant.
    pub fn new(rows: Vec<Trace>) -> Result<Self, TraceSetError> {
        if rows.is_empty() {
            return Err(TraceSetError::Empty);
        }
        let expected = rows[0].len();
        for (row, trace) in rows.iter().enumerate().skip(1) {
            if trace.len() != expected {
                return Err(TraceSetError::ShapeMismatch {
                    row,
                    expected,
                    actual: trace.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Number of traces (time steps).
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Samples per trace (distance points).
    pub fn columns(&self) -> usize {
        self.rows[0].len()
    }

    /// Borrow one trace by time index.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Borrow all rows in time order.
    pub fn as_rows(&self) -> &[Trace] {
        &self.rows
    }

    /// Iterate over traces in time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Trace> {
        self.rows.iter()
    }
}

/// Concurrent fan-out/fan-in builder for a [`TraceSet`].
#[derive(Debug, Clone)]
pub struct TraceSetBuilder {
    time_steps_count: usize,
    number_of_points: usize,
    seed: Option<u64>,
    cancel: Option<CancelToken>,
}

impl TraceSetBuilder {
    /// Build `time_steps_count` traces of `number_of_points` samples each.
    pub fn new(time_steps_count: usize, number_of_points: usize) -> Self {
        Self {
            time_steps_count,
            number_of_points,
            seed: None,
            cancel: None,
        }
    }

    /// Size the builder from a validated [`SensingConfig`].
    pub fn from_config(config: &SensingConfig) -> Self {
        Self::new(config.time_steps(), config.distance_points())
    }

    /// Fix a base seed for reproducible builds.
    ///
    /// Each row derives its own sub-seed from the base and its index, so
    /// the result is independent of rayon's scheduling.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attach a cancellation token checked at every row task.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Run all generation tasks and collect them in submission order.
    ///
    /// Succeeds only when every task completes; the first failure (or a
    /// cancellation) aborts the whole build with one aggregate error.
    pub fn build(&self) -> Result<TraceSet, TraceSetError> {
        if self.time_steps_count == 0 {
            return Err(TraceSetError::Empty);
        }

        info!(
            "Generating {} traces ({} points each) on {} threads...",
            self.time_steps_count,
            self.number_of_points,
            rayon::current_num_threads()
        );

        let rows: Vec<Trace> = (0..self.time_steps_count)
            .into_par_iter()
            .map(|i| {
                if let Some(token) = &self.cancel {
                    if token.is_cancelled() {
                        return Err(TraceSetError::Cancelled);
                    }
                }
                let mut generator = TraceGenerator::new(self.number_of_points);
                if let Some(base) = self.seed {
                    generator = generator.with_seed(row_seed(base, i));
                }
                Ok(generator.generate()?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Generated {} traces, {} samples total",
            rows.len(),
            rows.len() * self.number_of_points
        );
        TraceSet::new(rows)
    }
}

/// Derive a per-row sub-seed from a base seed and the row index.
fn row_seed(base: u64, row: usize) -> u64 {
    // splitmix64-style mix keeps sub-seeds decorrelated for adjacent rows.
    let mut z = base.wrapping_add((row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
