//! # fibertrace - Fiber Sensing Visualization Data Core
//!
//! `fibertrace` is the data-generation and synchronized multi-view
//! coordinate core behind a dual-view distributed optical-fiber sensing
//! visualization: a per-distance heat map of intensity over time, plus a
//! companion profile chart of the cumulative intensity at each distance.
//!
//! Rendering (series and axis construction, cursors, widgets, theming) is
//! a consumer of this crate, not a part of it. What lives here:
//!
//! - **Trace generation**: synthetic progressive random-walk intensity
//!   traces, one per time step ([`generator`]).
//! - **Concurrent trace-set building**: fan-out/fan-in with ordered join
//!   and atomic failure ([`traces`]).
//! - **Profile aggregation**: column-wise intensity sums over the full
//!   time window ([`profile`]).
//! - **Heat map grid addressing**: affine `(col, row)` → `(distance, time)`
//!   coordinate mapping with explicit data orientation ([`grid`]).
//! - **Intensity→color lookup**: ordered threshold steps with hard banding
//!   or clamped interpolation ([`lut`]).
//! - **Axis interval synchronization**: re-entrancy-guarded broadcast that
//!   keeps independently-zoomable views on one window ([`sync`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use fibertrace::config::SensingConfig;
//! use fibertrace::grid::{DataOrder, GridCoordinateMapping, HeatmapGrid};
//! use fibertrace::lut::IntensityLut;
//! use fibertrace::profile;
//! use fibertrace::traces::TraceSetBuilder;
//!
//! let config = SensingConfig {
//!     distance_step: 10.0,
//!     distance_start: 0.0,
//!     distance_end: 100.0,
//!     time_step: 1000,
//!     time_start: 0,
//!     time_end: 3000,
//! };
//! config.validate()?;
//!
//! // One trace per time step, generated concurrently, joined in order.
//! let trace_set = TraceSetBuilder::from_config(&config).with_seed(7).build()?;
//!
//! // Cumulative intensity per distance point.
//! let profile = profile::aggregate(&trace_set, config.distance_start, config.distance_step)?;
//! assert_eq!(profile.len(), config.distance_points());
//!
//! // Heat map cells addressed by (col, row), colored through the LUT.
//! let mapping = GridCoordinateMapping::from_config(&config, DataOrder::Rows);
//! let grid = HeatmapGrid::from_trace_set(mapping, &trace_set)?;
//! let lut = IntensityLut::fiber_default();
//! let _cell_color = lut.color_for(grid.intensity_at(3, 1)?);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Axis synchronization
//!
//! ```rust
//! use fibertrace::sync::{AxisInterval, AxisSyncGroup};
//!
//! let group = AxisSyncGroup::new();
//! let heatmap_x = group.register(AxisInterval::new(0.0, 3200.0));
//! let profile_x = group.register(AxisInterval::new(0.0, 3200.0));
//!
//! // User zooms the heat map; the profile chart follows exactly.
//! group.on_interval_change(heatmap_x, 400.0, 800.0)?;
//! assert_eq!(group.interval(profile_x)?, AxisInterval::new(400.0, 800.0));
//! # Ok::<(), fibertrace::sync::AxisSyncError>(())
//! ```

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod generator;
pub mod grid;
pub mod lut;
pub mod profile;
pub mod sync;
pub mod traces;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigError, SensingConfig};
    pub use crate::generator::{GeneratorError, TraceGenerator};
    pub use crate::grid::{
        DataOrder, GridCoordinateMapping, GridError, GridPoint, HeatmapGrid, HeatmapGridPayload,
    };
    pub use crate::lut::{ColorStep, IntensityLut, LutError, Rgba};
    pub use crate::profile::{aggregate, Profile, ProfileError, ProfilePoint};
    pub use crate::sync::{AxisId, AxisInterval, AxisSyncError, AxisSyncGroup, SilentSetFn};
    pub use crate::traces::{CancelToken, Trace, TraceSet, TraceSetBuilder, TraceSetError};
}
