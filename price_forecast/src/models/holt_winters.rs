//! Holt-Winters model with additive trend and additive seasonality

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::metrics::{fit_accuracy, FitSummary};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use log::{debug, warn};
use statrs::distribution::{ContinuousCDF, Normal};
use trade_math::{FittedHoltWinters, HoltWinters};

/// Weekly seasonality for daily observations
pub const WEEKLY_PERIOD: usize = 7;

/// Default coverage of the prediction intervals
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Holt-Winters forecaster whose smoothing parameters are estimated on training
#[derive(Debug, Clone)]
pub struct HoltWintersModel {
    /// Name of the model
    name: String,
    /// Smoothing engine
    engine: HoltWinters,
    /// Coverage of the prediction intervals
    confidence_level: f64,
}

/// Trained Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    name: String,
    fitted: FittedHoltWinters,
    actual: Vec<f64>,
    confidence_level: f64,
}

impl HoltWintersModel {
    /// Create a model with the given seasonal period
    pub fn new(seasonal_period: usize) -> Result<Self> {
        let engine = HoltWinters::new(seasonal_period)?;

        Ok(Self {
            name: format!("Holt-Winters (additive, period={})", seasonal_period),
            engine,
            confidence_level: DEFAULT_CONFIDENCE,
        })
    }

    /// Model with a period of 7 observations
    pub fn weekly() -> Result<Self> {
        Self::new(WEEKLY_PERIOD)
    }

    /// Set the coverage of the prediction intervals
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Result<Self> {
        if !confidence_level.is_finite() || confidence_level <= 0.0 || confidence_level >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }
        self.confidence_level = confidence_level;
        Ok(self)
    }

    /// Replace the underlying engine, e.g. to hold smoothing parameters fixed
    pub fn with_engine(mut self, engine: HoltWinters) -> Self {
        self.name = format!(
            "Holt-Winters (additive, period={})",
            engine.seasonal_period()
        );
        self.engine = engine;
        self
    }

    pub fn seasonal_period(&self) -> usize {
        self.engine.seasonal_period()
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }
}

impl ForecastModel for HoltWintersModel {
    type Trained = TrainedHoltWinters;

    fn train(&self, data: &PriceSeries) -> Result<Self::Trained> {
        let prices = data.prices();
        if prices.len() < self.min_observations() {
            return Err(ForecastError::InsufficientData {
                needed: self.min_observations(),
                got: prices.len(),
            });
        }

        let fitted = self.engine.fit(&prices)?;
        if fitted.converged {
            debug!(
                "{} fitted in {} iterations: alpha={:.4} beta={:.4} gamma={:.4} sse={:.4}",
                self.name,
                fitted.iterations,
                fitted.params.alpha,
                fitted.params.beta,
                fitted.params.gamma,
                fitted.sse
            );
        } else {
            warn!(
                "{} parameter search stopped after {} iterations without converging (sse={:.4})",
                self.name, fitted.iterations, fitted.sse
            );
        }

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            fitted,
            actual: prices,
            confidence_level: self.confidence_level,
        })
    }

    fn min_observations(&self) -> usize {
        self.engine.min_observations()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltWinters {
    /// The fitted smoothing state
    pub fn state(&self) -> &FittedHoltWinters {
        &self.fitted
    }

    /// Symmetric normal prediction intervals around `values`.
    ///
    /// The h-step variance follows the additive Holt-Winters state space
    /// form: `σ²(1 + Σ_{j<h} c_j²)` with `c_j = α(1 + jβ) + (1-α)γ·[j mod m = 0]`.
    fn intervals(&self, values: &[f64]) -> Result<Vec<(f64, f64)>> {
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::ForecastingError(e.to_string()))?;
        let z = normal.inverse_cdf(0.5 + self.confidence_level / 2.0);

        let sigma = self.fitted.residual_std_dev();
        let period = self.fitted.seasonal_period;
        let p = self.fitted.params;

        let mut cumulative = 1.0;
        let intervals = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                if i > 0 {
                    let seasonal = if i % period == 0 {
                        (1.0 - p.alpha) * p.gamma
                    } else {
                        0.0
                    };
                    let c = p.alpha * (1.0 + i as f64 * p.beta) + seasonal;
                    cumulative += c * c;
                }
                let margin = z * sigma * cumulative.sqrt();
                (value - margin, value + margin)
            })
            .collect();

        Ok(intervals)
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let values = self.fitted.forecast(horizon);
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::Convergence(
                "Forecast contains non-finite values".to_string(),
            ));
        }

        let intervals = self.intervals(&values)?;
        ForecastResult::new_with_intervals(values, horizon, intervals)
    }

    fn fitted_values(&self) -> &[f64] {
        &self.fitted.fitted
    }

    fn summary(&self) -> Result<FitSummary> {
        let skip = self.fitted.seasonal_period;
        let accuracy = fit_accuracy(&self.actual[skip..], &self.fitted.fitted[skip..])?;

        Ok(FitSummary {
            model: self.name.clone(),
            params: Some(self.fitted.params),
            seasonal_period: Some(self.fitted.seasonal_period),
            sse: self.fitted.sse,
            residual_std_dev: self.fitted.residual_std_dev(),
            converged: self.fitted.converged,
            iterations: self.fitted.iterations,
            accuracy,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
