use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use fibertrace::grid::{DataOrder, GridCoordinateMapping, HeatmapGrid, HeatmapGridPayload};
use fibertrace::lut::IntensityLut;
use fibertrace::profile::{self, Profile};
use fibertrace::traces::TraceSetBuilder;

use super::config::resolve_sensing;

/// Everything the rendering layer needs to construct both views.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VisualizationBundle {
    /// When the bundle was generated (RFC 3339)
    generated_at: String,
    /// Epoch milliseconds all heat map y coordinates are offset from
    time_origin: i64,
    /// Heat map construction payload
    heatmap: HeatmapGridPayload,
    /// Intensity LUT construction payload
    lut: IntensityLut,
    /// Distance-intensity profile for the companion chart
    profile: Profile,
}

/// Generate a demo sensing run and write the visualization bundle.
pub fn run(
    output: PathBuf,
    config: Option<PathBuf>,
    seed: Option<u64>,
    data_order: DataOrder,
) -> Result<()> {
    let (sensing, demo_config) = resolve_sensing(config.as_deref())?;
    let seed = seed.or(demo_config.seed);

    info!(
        "Sensing run: {} distance points x {} time steps",
        sensing.distance_points(),
        sensing.time_steps()
    );

    let mut builder = TraceSetBuilder::from_config(&sensing);
    if let Some(seed) = seed {
        info!("Using fixed seed {seed}");
        builder = builder.with_seed(seed);
    }
    let trace_set = builder.build().context("Trace generation failed")?;

    let profile = profile::aggregate(&trace_set, sensing.distance_start, sensing.distance_step)
        .context("Profile aggregation failed")?;

    let mapping = GridCoordinateMapping::from_config(&sensing, data_order);
    let grid = HeatmapGrid::from_trace_set(mapping, &trace_set)
        .context("Failed to bind trace set to the heat map grid")?;

    let bundle = VisualizationBundle {
        generated_at: Utc::now().to_rfc3339(),
        time_origin: sensing.time_start,
        heatmap: grid.payload(),
        lut: IntensityLut::fiber_default(),
        profile,
    };

    let file = File::create(&output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &bundle)
        .context("Failed to serialize visualization bundle")?;

    info!("Bundle written to {}", output.display());
    info!(
        "  {} traces, {} samples, profile of {} points",
        trace_set.rows(),
        trace_set.rows() * trace_set.columns(),
        bundle.profile.len()
    );

    Ok(())
}
