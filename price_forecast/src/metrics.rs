//! In-sample accuracy of a fitted model

use crate::error::{ForecastError, Result};
use serde::Serialize;
use trade_math::SmoothingParams;

/// Accuracy of one-step-ahead fitted values against the observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over non-zero observations
    pub mape: f64,
}

/// Compare fitted values with actual observations
pub fn fit_accuracy(actual: &[f64], fitted: &[f64]) -> Result<FitAccuracy> {
    if actual.len() != fitted.len() || actual.is_empty() {
        return Err(ForecastError::ValidationError(
            "Fitted and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = actual.len() as f64;
    let errors: Vec<f64> = actual.iter().zip(fitted).map(|(a, f)| a - f).collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let rmse = (errors.iter().map(|e| e.powi(2)).sum::<f64>() / n).sqrt();

    let (pct_sum, pct_count) = actual
        .iter()
        .zip(&errors)
        .filter(|(a, _)| **a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (a, e)| {
            (sum + (e / a).abs() * 100.0, count + 1)
        });
    let mape = if pct_count > 0 {
        pct_sum / pct_count as f64
    } else {
        0.0
    };

    Ok(FitAccuracy { mae, rmse, mape })
}

/// Description of a fitted model, for display and reports
#[derive(Debug, Clone, Serialize)]
pub struct FitSummary {
    pub model: String,
    pub params: Option<SmoothingParams>,
    pub seasonal_period: Option<usize>,
    pub sse: f64,
    pub residual_std_dev: f64,
    pub converged: bool,
    pub iterations: usize,
    pub accuracy: FitAccuracy,
}

impl std::fmt::Display for FitSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model: {}", self.model)?;
        if let Some(p) = &self.params {
            writeln!(
                f,
                "  alpha={:.4} beta={:.4} gamma={:.4}",
                p.alpha, p.beta, p.gamma
            )?;
        }
        writeln!(f, "  SSE:   {:.4}", self.sse)?;
        writeln!(f, "  MAE:   {:.4}", self.accuracy.mae)?;
        writeln!(f, "  RMSE:  {:.4}", self.accuracy.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.accuracy.mape)?;
        if !self.converged {
            writeln!(
                f,
                "  (parameter search stopped after {} iterations without converging)",
                self.iterations
            )?;
        }
        Ok(())
    }
}
