//! # Heatmap Grid Model
//!
//! Wraps a [`TraceSet`] in an affine coordinate mapping so renderers can
//! address intensity cells by `(column, row)` and recover the continuous
//! `(distance, time)` coordinate of any cell. The grid is the ground truth
//! other layers interpolate from if they choose to; cell reads here are
//! always discrete and uninterpolated.
//!
//! Data orientation is an explicit [`DataOrder`], never inferred from the
//! array shape: a square configuration makes both orientations
//! structurally valid, so the mapping and the supplied trace set are
//! validated against each other on every (re)bind.

use serde::Serialize;

use crate::config::SensingConfig;
use crate::traces::TraceSet;

/// Errors produced by grid addressing and rebinding
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A cell index fell outside the grid
    #[error("cell ({col}, {row}) out of bounds for a {columns}x{rows} grid")]
    OutOfBounds {
        /// Requested column
        col: usize,
        /// Requested row
        row: usize,
        /// Grid column count
        columns: usize,
        /// Grid row count
        rows: usize,
    },

    /// Supplied data disagrees with the mapping's dimensions
    #[error(
        "shape mismatch: grid expects {expected_rows}x{expected_columns}, \
         data is {actual_rows}x{actual_columns}"
    )]
    ShapeMismatch {
        /// Columns the mapping expects
        expected_columns: usize,
        /// Rows the mapping expects
        expected_rows: usize,
        /// Columns the data supplies
        actual_columns: usize,
        /// Rows the data supplies
        actual_rows: usize,
    },
}

/// How the backing buffer is laid out relative to the grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrder {
    /// Consecutive values share a row: `index = row * columns + col`
    Rows,
    /// Consecutive values share a column: `index = col * rows + row`
    Columns,
}

/// Pure affine mapping from integer cell indices to continuous coordinates.
///
/// `(col, row)` maps to `(origin_x + col * step_x, origin_y + row * step_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridCoordinateMapping {
    /// Number of cells along the x (distance) axis
    pub columns: usize,
    /// Number of cells along the y (time) axis
    pub rows: usize,
    /// x coordinate of cell (0, 0)
    pub origin_x: f64,
    /// y coordinate of cell (0, 0)
    pub origin_y: f64,
    /// x distance between adjacent columns
    pub step_x: f64,
    /// y distance between adjacent rows
    pub step_y: f64,
    /// Buffer layout relative to the grid axes
    pub order: DataOrder,
}

impl GridCoordinateMapping {
    /// Derive the mapping for a sensing run: distance along x, time along
    /// y, with the time origin rebased to zero (renderers offset date axes
    /// by the run's start time to avoid zoom precision issues).
    pub fn from_config(config: &SensingConfig, order: DataOrder) -> Self {
        Self {
            columns: config.distance_points(),
            rows: config.time_steps(),
            origin_x: config.distance_start,
            origin_y: 0.0,
            step_x: config.distance_step,
            step_y: config.time_step as f64,
            order,
        }
    }

    /// Whether `(col, row)` addresses a cell inside the grid.
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col < self.columns && row < self.rows
    }

    /// Continuous coordinate of cell `(col, row)`, bounds-checked.
    pub fn coordinate_of(&self, col: usize, row: usize) -> Result<(f64, f64), GridError> {
        if !self.contains(col, row) {
            return Err(self.out_of_bounds(col, row));
        }
        Ok((
            self.origin_x + col as f64 * self.step_x,
            self.origin_y + row as f64 * self.step_y,
        ))
    }

    /// Flat buffer index of cell `(col, row)` under this mapping's order.
    fn index_of(&self, col: usize, row: usize) -> usize {
        match self.order {
            DataOrder::Rows => row * self.columns + col,
            DataOrder::Columns => col * self.rows + row,
        }
    }

    fn out_of_bounds(&self, col: usize, row: usize) -> GridError {
        GridError::OutOfBounds {
            col,
            row,
            columns: self.columns,
            rows: self.rows,
        }
    }

    fn check_shape(&self, trace_set: &TraceSet) -> Result<(), GridError> {
        if trace_set.rows() != self.rows || trace_set.columns() != self.columns {
            return Err(GridError::ShapeMismatch {
                expected_columns: self.columns,
                expected_rows: self.rows,
                actual_columns: trace_set.columns(),
                actual_rows: trace_set.rows(),
            });
        }
        Ok(())
    }
}

/// Intensity grid: a coordinate mapping plus the flat cell buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    mapping: GridCoordinateMapping,
    values: Vec<f64>,
}

impl HeatmapGrid {
    /// Bind a trace set to a mapping, flattening it in the mapping's order.
    ///
    /// Trace-set rows are time steps (grid rows); the shapes must agree.
    pub fn from_trace_set(
        mapping: GridCoordinateMapping,
        trace_set: &TraceSet,
    ) -> Result<Self, GridError> {
        mapping.check_shape(trace_set)?;
        let mut grid = Self {
            mapping,
            values: vec![0.0; mapping.columns * mapping.rows],
        };
        grid.fill_from(trace_set);
        Ok(grid)
    }

    /// Rebind fresh data without reconstructing the mapping.
    ///
    /// Rejects data whose shape disagrees with the existing mapping;
    /// callers must reconfigure the mapping explicitly rather than have
    /// misshaped data silently reinterpreted.
    pub fn replace_values(&mut self, trace_set: &TraceSet) -> Result<(), GridError> {
        self.mapping.check_shape(trace_set)?;
        self.fill_from(trace_set);
        Ok(())
    }

    fn fill_from(&mut self, trace_set: &TraceSet) {
        for (row, trace) in trace_set.iter().enumerate() {
            for (col, &sample) in trace.iter().enumerate() {
                self.values[self.mapping.index_of(col, row)] = sample;
            }
        }
    }

    /// The grid's coordinate mapping.
    pub fn mapping(&self) -> &GridCoordinateMapping {
        &self.mapping
    }

    /// Discrete, uninterpolated intensity of cell `(col, row)`.
    pub fn intensity_at(&self, col: usize, row: usize) -> Result<f64, GridError> {
        if !self.mapping.contains(col, row) {
            return Err(self.mapping.out_of_bounds(col, row));
        }
        Ok(self.values[self.mapping.index_of(col, row)])
    }

    /// Continuous coordinate of cell `(col, row)`.
    pub fn coordinate_of(&self, col: usize, row: usize) -> Result<(f64, f64), GridError> {
        self.mapping.coordinate_of(col, row)
    }

    /// Assemble the construction payload consumed by the rendering layer.
    pub fn payload(&self) -> HeatmapGridPayload {
        // Degenerate zero-cell grids have an empty buffer; clamp the chunk
        // size so they serialize to an empty value list.
        let minor = match self.mapping.order {
            DataOrder::Rows => self.mapping.columns,
            DataOrder::Columns => self.mapping.rows,
        }
        .max(1);
        HeatmapGridPayload {
            columns: self.mapping.columns,
            rows: self.mapping.rows,
            start: GridPoint {
                x: self.mapping.origin_x,
                y: self.mapping.origin_y,
            },
            step: GridPoint {
                x: self.mapping.step_x,
                y: self.mapping.step_y,
            },
            data_order: self.mapping.order,
            values: self.values.chunks(minor).map(<[f64]>::to_vec).collect(),
        }
    }
}

/// A 2-D point in grid payload terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPoint {
    /// x component
    pub x: f64,
    /// y component
    pub y: f64,
}

/// Heat map construction payload handed to the external rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapGridPayload {
    /// Cells along x
    pub columns: usize,
    /// Cells along y
    pub rows: usize,
    /// Coordinate of cell (0, 0)
    pub start: GridPoint,
    /// Cell pitch along each axis
    pub step: GridPoint,
    /// Buffer layout, `"rows"` or `"columns"`
    pub data_order: DataOrder,
    /// Cell intensities grouped by the minor dimension
    pub values: Vec<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(order: DataOrder) -> GridCoordinateMapping {
        GridCoordinateMapping {
            columns: 3,
            rows: 2,
            origin_x: 100.0,
            origin_y: 0.0,
            step_x: 10.0,
            step_y: 1000.0,
            order,
        }
    }

    fn trace_set() -> TraceSet {
        TraceSet::new(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_affine_coordinates() {
        let m = mapping(DataOrder::Rows);
        assert_eq!(m.coordinate_of(0, 0).unwrap(), (100.0, 0.0));
        assert_eq!(m.coordinate_of(2, 1).unwrap(), (120.0, 1000.0));
    }

    #[test]
    fn test_out_of_range_coordinate_is_error() {
        let m = mapping(DataOrder::Rows);
        assert!(matches!(
            m.coordinate_of(3, 0),
            Err(GridError::OutOfBounds { col: 3, row: 0, .. })
        ));
        assert!(matches!(
            m.coordinate_of(0, 2),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_intensity_lookup_row_major() {
        let grid = HeatmapGrid::from_trace_set(mapping(DataOrder::Rows), &trace_set()).unwrap();
        assert_eq!(grid.intensity_at(0, 0).unwrap(), 1.0);
        assert_eq!(grid.intensity_at(2, 0).unwrap(), 3.0);
        assert_eq!(grid.intensity_at(0, 1).unwrap(), 4.0);
        assert_eq!(grid.intensity_at(2, 1).unwrap(), 6.0);
    }

    #[test]
    fn test_intensity_lookup_column_major_matches_row_major() {
        let by_rows = HeatmapGrid::from_trace_set(mapping(DataOrder::Rows), &trace_set()).unwrap();
        let by_cols =
            HeatmapGrid::from_trace_set(mapping(DataOrder::Columns), &trace_set()).unwrap();
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(
                    by_rows.intensity_at(col, row).unwrap(),
                    by_cols.intensity_at(col, row).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_bind_rejects_wrong_shape() {
        let wide = TraceSet::new(vec![vec![0.0; 4], vec![0.0; 4]]).unwrap();
        assert!(matches!(
            HeatmapGrid::from_trace_set(mapping(DataOrder::Rows), &wide),
            Err(GridError::ShapeMismatch {
                expected_columns: 3,
                actual_columns: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_replace_values_rebinds_in_place() {
        let mut grid =
            HeatmapGrid::from_trace_set(mapping(DataOrder::Rows), &trace_set()).unwrap();
        let fresh = TraceSet::new(vec![vec![9.0, 8.0, 7.0], vec![6.0, 5.0, 4.0]]).unwrap();
        grid.replace_values(&fresh).unwrap();
        assert_eq!(grid.intensity_at(0, 0).unwrap(), 9.0);
        assert_eq!(grid.intensity_at(2, 1).unwrap(), 4.0);

        let misshaped = TraceSet::new(vec![vec![0.0; 3]]).unwrap();
        assert!(matches!(
            grid.replace_values(&misshaped),
            Err(GridError::ShapeMismatch { .. })
        ));
        // Failed rebind leaves the previous data intact.
        assert_eq!(grid.intensity_at(0, 0).unwrap(), 9.0);
    }

    #[test]
    fn test_payload_shape() {
        let grid = HeatmapGrid::from_trace_set(mapping(DataOrder::Rows), &trace_set()).unwrap();
        let payload = grid.payload();
        assert_eq!(payload.columns, 3);
        assert_eq!(payload.rows, 2);
        assert_eq!(payload.values, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["dataOrder"], "rows");
        assert_eq!(json["start"]["x"], 100.0);
        assert_eq!(json["step"]["y"], 1000.0);
    }
}
