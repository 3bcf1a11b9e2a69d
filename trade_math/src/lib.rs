//! # Trade Math
//!
//! Numerical building blocks for price forecasting.
//! This crate provides the Holt-Winters (triple exponential smoothing)
//! engine and the bounded Nelder-Mead optimiser used to estimate its
//! smoothing parameters.

use thiserror::Error;

pub mod forecasting;
pub mod optimize;

pub use forecasting::{FittedHoltWinters, HoltWinters, SmoothingParams};
pub use optimize::{nelder_mead, NelderMeadConfig, OptimizationResult};

/// Errors that can occur in forecasting calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Failed to converge: {0}")]
    Convergence(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;
