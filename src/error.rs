//! Errors raised while setting up the dashboard

use price_forecast::ForecastError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration could not be read or is inconsistent
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors that stop the dashboard from starting
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("The price file contains no rows")]
    EmptySeries,
}
