//! Run configuration.
//!
//! A configuration document is loaded once at initialization and treated as
//! immutable for the lifetime of the run. The orchestrator never mutates it.
//!
//! The on-disk representation is TOML, deserialized through serde:
//!
//! ```toml
//! [simulation]
//! name = "tutorial run"
//! start_date = "1981-05-24"
//! end_date = "1981-05-26"
//! timestep = 3600
//!
//! [runoff]
//! read_from_file = true
//!
//! [water_management]
//! enabled = true
//!
//! [water_management.demand]
//! read_from_file = true
//!
//! [water_management.reservoirs]
//! streamflow_time_resolution = "month"
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{ModelError, ModelResult};

/// Time resolution of the precomputed reservoir streamflow schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeResolution {
    /// Calendar month (1..=12)
    #[default]
    Month,
    /// CDC epidemiological week (1..=53)
    Epiweek,
}

/// Top-level simulation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Human-readable run name; sanitized before use as a path component
    pub name: String,
    /// First simulated day (run starts at its midnight)
    pub start_date: NaiveDate,
    /// Last simulated day (run ends at its final second)
    pub end_date: NaiveDate,
    /// Step size in seconds
    pub timestep: u64,
    /// Optional restart snapshot to warm-start from; the date embedded in
    /// the file name overrides `start_date`
    #[serde(default)]
    pub restart_file: Option<PathBuf>,
    /// Mirror log output to stdout in addition to the run log
    #[serde(default)]
    pub log_to_std_out: bool,
}

/// Runoff forcing options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunoffConfig {
    /// Whether runoff is ingested from an external source each step
    #[serde(default)]
    pub read_from_file: bool,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Water demand forcing options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DemandConfig {
    /// Whether demand is reloaded at calendar-period boundaries
    #[serde(default)]
    pub read_from_file: bool,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Reservoir operation options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReservoirConfig {
    /// Period granularity of the precomputed streamflow schedule
    #[serde(default)]
    pub streamflow_time_resolution: TimeResolution,
}

/// Water management module options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WaterManagementConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub demand: DemandConfig,
    #[serde(default)]
    pub reservoirs: ReservoirConfig,
}

/// Full run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub runoff: RunoffConfig,
    #[serde(default)]
    pub water_management: WaterManagementConfig,
}

impl Config {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(document: &str) -> ModelResult<Self> {
        toml::from_str(document).map_err(|e| ModelError::Configuration(e.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ModelResult<Self> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }

    /// Validate invariants that cannot be expressed in the schema.
    ///
    /// Fails with [`ModelError::Configuration`] when `end_date` precedes
    /// `start_date`, the timestep is zero, or the run name is empty.
    pub fn validate(&self) -> ModelResult<()> {
        let sim = &self.simulation;
        if sim.end_date < sim.start_date {
            return Err(ModelError::Configuration(format!(
                "configured `end_date` {} is prior to configured `start_date` {}; please update and try again",
                sim.end_date, sim.start_date
            )));
        }
        if sim.timestep == 0 {
            return Err(ModelError::Configuration(
                "`timestep` must be a positive number of seconds".to_string(),
            ));
        }
        if sim.name.trim().is_empty() {
            return Err(ModelError::Configuration(
                "`simulation.name` must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Run name reduced to a filesystem-safe token.
    ///
    /// Whitespace becomes underscores and path-hostile characters are dropped.
    pub fn sanitized_name(&self) -> String {
        self.simulation
            .name
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
            .collect()
    }
}
