//! Error types for the price_forecast crate

use thiserror::Error;
use trade_math::MathError;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Input file or frame is malformed
    #[error("Data error: {0}")]
    DataError(String),

    /// Inputs are well-formed but cannot be forecast
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Not enough history for the requested model
    #[error("Insufficient history: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Dates are not evenly spaced, so no forecast frequency can be inferred
    #[error("Irregular date frequency: {0}")]
    IrregularFrequency(String),

    /// The smoothing model failed to produce a usable fit
    #[error("Model failed to converge: {0}")]
    Convergence(String),

    /// Error related to forecasting operations
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error writing CSV exports
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error writing JSON reports
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ForecastError {
    /// Whether the error is a user-facing validation failure raised before
    /// any model fitting happened
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ForecastError::ValidationError(_)
                | ForecastError::InvalidParameter(_)
                | ForecastError::InsufficientData { .. }
                | ForecastError::IrregularFrequency(_)
        )
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<polars::prelude::PolarsError> for ForecastError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::Convergence(msg) => ForecastError::Convergence(msg),
            MathError::InvalidInput(msg) => ForecastError::InvalidParameter(msg),
            MathError::InsufficientData(msg) | MathError::CalculationError(msg) => {
                ForecastError::ForecastingError(msg)
            }
        }
    }
}
