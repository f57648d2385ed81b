//! Property tests for the data model invariants.

use proptest::prelude::*;

use fibertrace::generator::TraceGenerator;
use fibertrace::grid::{DataOrder, GridCoordinateMapping};
use fibertrace::lut::{ColorStep, IntensityLut, Rgba};
use fibertrace::profile;
use fibertrace::traces::TraceSet;

proptest! {
    /// Every sample the generator produces is non-negative, for any point
    /// count and seed.
    #[test]
    fn prop_samples_non_negative(points in 1usize..256, seed in any::<u64>()) {
        let trace = TraceGenerator::new(points).with_seed(seed).generate().unwrap();
        prop_assert_eq!(trace.len(), points);
        prop_assert!(trace.iter().all(|&v| v >= 0.0));
    }

    /// The profile has one point per column and each y is the exact column
    /// sum.
    #[test]
    fn prop_profile_matches_column_sums(
        rows in 1usize..8,
        columns in 1usize..16,
        seed in any::<u64>(),
        start in -1000.0f64..1000.0,
        step in 0.1f64..100.0,
    ) {
        let traces: Vec<Vec<f64>> = (0..rows)
            .map(|r| {
                TraceGenerator::new(columns)
                    .with_seed(seed.wrapping_add(r as u64))
                    .generate()
                    .unwrap()
            })
            .collect();
        let set = TraceSet::new(traces.clone()).unwrap();

        let result = profile::aggregate(&set, start, step).unwrap();
        prop_assert_eq!(result.len(), columns);
        for (i, point) in result.iter().enumerate() {
            let expected: f64 = traces.iter().map(|t| t[i]).sum();
            prop_assert!((point.y - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            prop_assert!((point.x - (start + i as f64 * step)).abs() < 1e-9);
        }
    }

    /// The coordinate mapping is exactly affine over its whole index range.
    #[test]
    fn prop_mapping_is_affine(
        columns in 1usize..64,
        rows in 1usize..64,
        origin_x in -1e6f64..1e6,
        origin_y in -1e6f64..1e6,
        step_x in 0.001f64..1e3,
        step_y in 0.001f64..1e3,
        col_frac in 0.0f64..1.0,
        row_frac in 0.0f64..1.0,
    ) {
        let mapping = GridCoordinateMapping {
            columns,
            rows,
            origin_x,
            origin_y,
            step_x,
            step_y,
            order: DataOrder::Rows,
        };
        let col = ((columns - 1) as f64 * col_frac) as usize;
        let row = ((rows - 1) as f64 * row_frac) as usize;

        let (x, y) = mapping.coordinate_of(col, row).unwrap();
        prop_assert_eq!(x, origin_x + col as f64 * step_x);
        prop_assert_eq!(y, origin_y + row as f64 * step_y);

        prop_assert!(mapping.coordinate_of(columns, row).is_err());
        prop_assert!(mapping.coordinate_of(col, rows).is_err());
    }

    /// Hard banding always returns the color of the greatest step at or
    /// below the value, so the matched band index is monotone in the value.
    #[test]
    fn prop_banding_is_monotone(values in prop::collection::vec(-1e4f64..1e4, 2..32)) {
        let steps = vec![
            ColorStep::new(0.0, Rgba::rgb(0, 0, 0)),
            ColorStep::new(100.0, Rgba::rgb(1, 1, 1)),
            ColorStep::new(250.0, Rgba::rgb(2, 2, 2)),
            ColorStep::new(900.0, Rgba::rgb(3, 3, 3)),
        ];
        let lut = IntensityLut::new(steps.clone(), false).unwrap();

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite"));

        let band = |v: f64| -> usize {
            let color = lut.color_for(v);
            steps.iter().position(|s| s.color == color).expect("step color")
        };

        let mut previous = 0usize;
        for v in sorted {
            let current = band(v);
            prop_assert!(current >= previous);
            previous = current;
        }
    }
}
