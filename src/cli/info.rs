use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use std::path::PathBuf;

use super::config::resolve_sensing;

/// Display the derived dimensions of a run configuration
pub fn run(config: Option<PathBuf>) -> Result<()> {
    let (sensing, _) = resolve_sensing(config.as_deref())?;

    let window_start = Utc
        .timestamp_millis_opt(sensing.time_start)
        .single()
        .context("Time window start is out of range")?;
    let window_end = Utc
        .timestamp_millis_opt(sensing.time_end)
        .single()
        .context("Time window end is out of range")?;

    let columns = sensing.distance_points();
    let rows = sensing.time_steps();

    println!("fibertrace Run Configuration");
    println!("============================");
    println!();

    println!("Distance axis:");
    println!(
        "  {} m .. {} m, step {} m",
        sensing.distance_start, sensing.distance_end, sensing.distance_step
    );
    println!("  Measurement points (columns): {}", columns);
    println!();

    println!("Time axis:");
    println!(
        "  {} .. {}, step {} ms",
        window_start.format("%Y-%m-%d %H:%M:%S%.3f"),
        window_end.format("%Y-%m-%d %H:%M:%S%.3f"),
        sensing.time_step
    );
    println!("  Time steps (rows): {}", rows);
    println!();

    println!("Heat map grid: {} x {} = {} cells", columns, rows, columns * rows);

    Ok(())
}
