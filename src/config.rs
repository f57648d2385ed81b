//! # Sensing Run Configuration
//!
//! Static parameters for one fiber-sensing run: the spatial (distance) axis
//! and the temporal axis, plus the derived grid dimensions every other
//! component is sized from.
//!
//! The configuration is fixed at startup and read-only for the run's
//! lifetime. Time bounds are epoch milliseconds; in TOML they may also be
//! written as datetime strings (`"2021-06-17T08:54:04"`), which are parsed
//! through chrono and treated as UTC.

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer};

/// Errors produced by configuration validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A step parameter was zero or negative
    #[error("invalid config: {axis} step must be > 0, got {value}")]
    NonPositiveStep {
        /// Which axis the step belongs to ("distance" or "time")
        axis: &'static str,
        /// The offending step value
        value: f64,
    },

    /// An axis range was empty or inverted
    #[error("invalid config: {axis} end ({end}) must be greater than start ({start})")]
    EmptyRange {
        /// Which axis the range belongs to ("distance" or "time")
        axis: &'static str,
        /// Range start
        start: f64,
        /// Range end
        end: f64,
    },

    /// A time bound string could not be parsed as a datetime
    #[error("invalid config: unparseable datetime: {0}")]
    BadDateTime(String),
}

/// Static parameters of a sensing run.
///
/// Distances are in meters along the fiber, times in epoch milliseconds.
/// All six parameters are required; there are no defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensingConfig {
    /// Step between optical fibre measurements (meters)
    pub distance_step: f64,

    /// Start value for the optical fibre distance axis (meters)
    pub distance_start: f64,

    /// End value for the optical fibre distance axis (meters)
    pub distance_end: f64,

    /// Step between heat map rows along the time axis (milliseconds)
    pub time_step: i64,

    /// Start of the time window (epoch milliseconds, or a datetime string)
    #[serde(deserialize_with = "de_epoch_millis")]
    pub time_start: i64,

    /// End of the time window (epoch milliseconds, or a datetime string)
    #[serde(deserialize_with = "de_epoch_millis")]
    pub time_end: i64,
}

impl SensingConfig {
    /// Validate the parameter set.
    ///
    /// Both steps must be positive and both ranges non-empty. Returns the
    /// first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.distance_step > 0.0) {
            return Err(ConfigError::NonPositiveStep {
                axis: "distance",
                value: self.distance_step,
            });
        }
        if self.time_step <= 0 {
            return Err(ConfigError::NonPositiveStep {
                axis: "time",
                value: self.time_step as f64,
            });
        }
        if self.distance_end <= self.distance_start {
            return Err(ConfigError::EmptyRange {
                axis: "distance",
                start: self.distance_start,
                end: self.distance_end,
            });
        }
        if self.time_end <= self.time_start {
            return Err(ConfigError::EmptyRange {
                axis: "time",
                start: self.time_start as f64,
                end: self.time_end as f64,
            });
        }
        Ok(())
    }

    /// Number of measurement points along the fiber (heat map columns).
    ///
    /// `ceil((distance_end - distance_start) / distance_step)`.
    pub fn distance_points(&self) -> usize {
        ((self.distance_end - self.distance_start) / self.distance_step).ceil() as usize
    }

    /// Number of time steps in the window (heat map rows).
    ///
    /// `ceil((time_end - time_start) / time_step)`.
    pub fn time_steps(&self) -> usize {
        let span = self.time_end - self.time_start;
        (span as f64 / self.time_step as f64).ceil() as usize
    }
}

/// Accept either an integer epoch-millisecond value or a datetime string.
fn de_epoch_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TimeBound {
        Millis(i64),
        DateTime(String),
    }

    match TimeBound::deserialize(deserializer)? {
        TimeBound::Millis(ms) => Ok(ms),
        TimeBound::DateTime(s) => parse_epoch_millis(&s).map_err(de::Error::custom),
    }
}

/// Parse a datetime string into epoch milliseconds (UTC).
///
/// Accepts RFC 3339 (`2021-06-17T08:54:04Z`) and the naive form without an
/// offset (`2021-06-17T08:54:04`), which is taken as UTC.
pub fn parse_epoch_millis(s: &str) -> Result<i64, ConfigError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.and_utc().timestamp_millis())
        .map_err(|_| ConfigError::BadDateTime(s.to_string()))
}
