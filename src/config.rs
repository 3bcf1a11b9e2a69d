//! Dashboard configuration
//!
//! Every field has a default, so a config file only needs to list what it
//! changes. Command-line arguments take priority over the file.

use crate::error::ConfigError;
use price_forecast::assemble::{DEFAULT_HORIZON, MAX_HORIZON, MIN_HORIZON};
use price_forecast::models::holt_winters::{DEFAULT_CONFIDENCE, WEEKLY_PERIOD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Khmer(riel) Stock Price Prediction";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 72,
            height: 18,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub title: String,
    /// CSV with `Date` and `Price` columns
    pub data_path: Option<PathBuf>,
    pub default_horizon: usize,
    /// Observations per season. The dashboard is a weekly model over daily
    /// prices; any value other than 7 changes both the fit and the minimum
    /// history (two seasons) a range needs before it can be forecast.
    pub seasonal_period: usize,
    /// Coverage of the prediction intervals
    pub confidence_level: f64,
    /// Most recent history rows shown in the dataset table
    pub table_rows: usize,
    pub chart: ChartConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            data_path: None,
            default_horizon: DEFAULT_HORIZON,
            seasonal_period: WEEKLY_PERIOD,
            confidence_level: DEFAULT_CONFIDENCE,
            table_rows: 15,
            chart: ChartConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_HORIZON..=MAX_HORIZON).contains(&self.default_horizon) {
            return Err(ConfigError::Invalid(format!(
                "default_horizon must be between {} and {}",
                MIN_HORIZON, MAX_HORIZON
            )));
        }
        if self.seasonal_period < 2 {
            return Err(ConfigError::Invalid(
                "seasonal_period must be at least 2".to_string(),
            ));
        }
        if !self.confidence_level.is_finite()
            || self.confidence_level <= 0.0
            || self.confidence_level >= 1.0
        {
            return Err(ConfigError::Invalid(
                "confidence_level must be between 0 and 1".to_string(),
            ));
        }
        if self.chart.width < 20 || self.chart.height < 5 {
            return Err(ConfigError::Invalid(
                "chart must be at least 20 columns by 5 rows".to_string(),
            ));
        }
        Ok(())
    }
}
