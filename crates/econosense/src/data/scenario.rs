//! YAML inputs
//!
//! Series files are a list of observations:
//!
//! ```yaml
//! - period: Jan-2023
//!   value: 25.6
//! - period: Feb-2023
//!   value: 28.1
//! ```
//!
//! Scenario files hold a `SimulationConfig`; any omitted field takes its
//! default:
//!
//! ```yaml
//! initial_cash: 10000
//! horizon_months: 6
//! monthly_inflation_pct: 5.0
//! revenue: { mean: 5000, std_dev: 1000 }
//! ```

use std::fs;
use std::path::Path;

use econosense_core::{SimulationConfig, TimeSeries};

/// Error types for loading input files
#[derive(Debug)]
pub enum DataError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Io(msg) => write!(f, "IO error: {msg}"),
            DataError::Parse(msg) => write!(f, "Parse error: {msg}"),
            DataError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for DataError {}

fn read_file(path: &Path) -> Result<String, DataError> {
    fs::read_to_string(path).map_err(|e| DataError::Io(format!("{}: {e}", path.display())))
}

/// Parse a monthly series from YAML; contiguity is validated on the way in
pub fn series_from_yaml(yaml: &str) -> Result<TimeSeries, DataError> {
    serde_saphyr::from_str(yaml).map_err(|e| DataError::Parse(e.to_string()))
}

pub fn scenario_from_yaml(yaml: &str) -> Result<SimulationConfig, DataError> {
    serde_saphyr::from_str(yaml).map_err(|e| DataError::Parse(e.to_string()))
}

pub fn scenario_to_yaml(config: &SimulationConfig) -> Result<String, DataError> {
    serde_saphyr::to_string(config).map_err(|e| DataError::Serialize(e.to_string()))
}

pub fn load_series(path: &Path) -> Result<TimeSeries, DataError> {
    let yaml = read_file(path)?;
    let series = series_from_yaml(&yaml)?;
    tracing::debug!(
        path = %path.display(),
        observations = series.len(),
        "Loaded series"
    );
    Ok(series)
}

pub fn load_scenario(path: &Path) -> Result<SimulationConfig, DataError> {
    let yaml = read_file(path)?;
    let config = scenario_from_yaml(&yaml)?;
    tracing::debug!(path = %path.display(), "Loaded scenario");
    Ok(config)
}
