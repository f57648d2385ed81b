//! # Profile Aggregator
//!
//! Reduces a [`TraceSet`] column-wise into the distance-intensity profile
//! shown above the heat map: for each distance point, the sum of that
//! column's intensity over every time step.

use serde::Serialize;

use crate::traces::TraceSet;

/// Errors produced by profile aggregation
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Aggregation over zero traces or zero-length traces
    #[error("empty input: cannot aggregate a profile from {0}")]
    EmptyInput(&'static str),
}

/// One point of the aggregate profile: distance along the fiber and the
/// intensity sum at that distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfilePoint {
    /// Distance along the fiber (meters)
    pub x: f64,
    /// Intensity summed over all time steps
    pub y: f64,
}

/// Ordered sequence of profile points, one per distance column.
pub type Profile = Vec<ProfilePoint>;

/// Sum every column of `trace_set` over all rows.
///
/// `x_i = distance_start + i * distance_step`; `y_i = Σ_t trace_set[t][i]`.
/// Pure and deterministic. The rectangularity invariant is guaranteed by
/// [`TraceSet`] construction; emptiness is rejected here.
pub fn aggregate(
    trace_set: &TraceSet,
    distance_start: f64,
    distance_step: f64,
) -> Result<Profile, ProfileError> {
    let columns = trace_set.columns();
    if columns == 0 {
        return Err(ProfileError::EmptyInput("zero-length traces"));
    }

    let mut sums = vec![0.0_f64; columns];
    for trace in trace_set.iter() {
        for (sum, sample) in sums.iter_mut().zip(trace) {
            *sum += sample;
        }
    }

    Ok(sums
        .into_iter()
        .enumerate()
        .map(|(i, y)| ProfilePoint {
            x: distance_start + i as f64 * distance_step,
            y,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_sums_and_x_positions() {
        let set = TraceSet::new(vec![
            vec![1.0, 2.0, 3.0],
            vec![10.0, 20.0, 30.0],
            vec![100.0, 200.0, 300.0],
        ])
        .unwrap();

        let profile = aggregate(&set, 50.0, 10.0).unwrap();
        assert_eq!(profile.len(), 3);

        assert_eq!(profile[0], ProfilePoint { x: 50.0, y: 111.0 });
        assert_eq!(profile[1], ProfilePoint { x: 60.0, y: 222.0 });
        assert_eq!(profile[2], ProfilePoint { x: 70.0, y: 333.0 });
    }

    #[test]
    fn test_single_row_profile_equals_trace() {
        let set = TraceSet::new(vec![vec![5.0, 0.0, 2.5]]).unwrap();
        let profile = aggregate(&set, 0.0, 1.0).unwrap();
        let ys: Vec<f64> = profile.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![5.0, 0.0, 2.5]);
    }

    #[test]
    fn test_zero_length_traces_rejected() {
        let set = TraceSet::new(vec![vec![], vec![]]).unwrap();
        assert!(matches!(
            aggregate(&set, 0.0, 1.0),
            Err(ProfileError::EmptyInput(_))
        ));
    }
}
