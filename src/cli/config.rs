//! TOML configuration file support.
//!
//! Run parameters can be given in a config file instead of relying on the
//! built-in defaults:
//!
//! ```toml
//! # fibertrace.toml
//! [sensing]
//! distance_step = 10.0
//! distance_start = 0.0
//! distance_end = 3200.0
//! time_step = 1000
//! time_start = "2021-06-17T08:54:04"
//! time_end = "2021-06-17T08:54:38"
//!
//! [demo]
//! seed = 42
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use fibertrace::config::SensingConfig;

/// Root configuration structure for fibertrace.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Run parameters; built-in defaults apply when omitted.
    pub sensing: Option<SensingConfig>,

    /// Demo-specific settings.
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Settings for the demo command.
#[derive(Debug, Default, Deserialize)]
pub struct DemoConfig {
    /// Generator seed; a CLI `--seed` flag takes precedence.
    pub seed: Option<u64>,
}

impl FileConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

/// The run parameters of the original fiber monitoring demo: a 3.2 km
/// fiber sampled every 10 m, over a 34-second window at one-second steps.
pub fn default_sensing_config() -> SensingConfig {
    SensingConfig {
        distance_step: 10.0,
        distance_start: 0.0,
        distance_end: 3200.0,
        time_step: 1000,
        // 2021-06-17T08:54:04 UTC .. 2021-06-17T08:54:38 UTC
        time_start: 1_623_920_044_000,
        time_end: 1_623_920_078_000,
    }
}

/// Resolve the effective run parameters: the config file's `[sensing]`
/// table when present, the built-in demo defaults otherwise.
pub fn resolve_sensing(path: Option<&Path>) -> Result<(SensingConfig, DemoConfig)> {
    let file = match path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let sensing = file.sensing.unwrap_or_else(default_sensing_config);
    sensing.validate().context("Invalid run configuration")?;
    Ok((sensing, file.demo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [sensing]
            distance_step = 5.0
            distance_start = 0.0
            distance_end = 1000.0
            time_step = 500
            time_start = 0
            time_end = 10000

            [demo]
            seed = 42
        "#;

        let config = FileConfig::parse(toml).unwrap();
        let sensing = config.sensing.unwrap();
        assert_eq!(sensing.distance_points(), 200);
        assert_eq!(sensing.time_steps(), 20);
        assert_eq!(config.demo.seed, Some(42));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FileConfig::parse("").unwrap();
        assert!(config.sensing.is_none());
        assert_eq!(config.demo.seed, None);

        let defaults = default_sensing_config();
        defaults.validate().unwrap();
        assert_eq!(defaults.distance_points(), 320);
        assert_eq!(defaults.time_steps(), 34);
    }

    #[test]
    fn test_invalid_sensing_rejected_on_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            r#"
            [sensing]
            distance_step = -1.0
            distance_start = 0.0
            distance_end = 100.0
            time_step = 1000
            time_start = 0
            time_end = 3000
        "#,
        )
        .unwrap();

        assert!(resolve_sensing(Some(&path)).is_err());
    }
}
