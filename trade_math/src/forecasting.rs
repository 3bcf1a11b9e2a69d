//! Holt-Winters forecasting
//!
//! Triple exponential smoothing with an additive trend and additive
//! seasonality:
//! - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
//! - Trend: `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
//! - Seasonal: `s_t = γ(y_t - l_t) + (1-γ)s_{t-m}`
//! - Forecast: `ŷ_{n+h} = l_n + h·b_n + s_{n+h-m}`
//!
//! The first season is used to initialise the state; smoothing parameters
//! that are not fixed by the caller are estimated by minimising the
//! one-step-ahead sum of squared errors.

use crate::optimize::{nelder_mead, NelderMeadConfig};
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Smoothing parameters are kept strictly inside (0, 1)
const PARAM_BOUNDS: (f64, f64) = (1e-4, 1.0 - 1e-4);

/// Starting point for parameter estimation
const DEFAULT_PARAMS: SmoothingParams = SmoothingParams {
    alpha: 0.3,
    beta: 0.1,
    gamma: 0.1,
};

/// Level, trend and seasonal smoothing coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingParams {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

/// Unfitted Holt-Winters model description
#[derive(Debug, Clone)]
pub struct HoltWinters {
    seasonal_period: usize,
    alpha: Option<f64>,
    beta: Option<f64>,
    gamma: Option<f64>,
    optimizer: NelderMeadConfig,
}

/// Holt-Winters model fitted to a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedHoltWinters {
    /// Smoothing parameters used for the final pass
    pub params: SmoothingParams,
    /// Seasonal period
    pub seasonal_period: usize,
    /// Level after the last observation
    pub level: f64,
    /// Trend after the last observation
    pub trend: f64,
    /// Seasonal components indexed by `t % seasonal_period`
    pub seasonals: Vec<f64>,
    /// One-step-ahead fitted values (the first season echoes the data)
    pub fitted: Vec<f64>,
    /// In-sample sum of squared one-step-ahead errors
    pub sse: f64,
    /// Whether parameter estimation reached its tolerance
    pub converged: bool,
    /// Optimiser iterations spent
    pub iterations: usize,
    /// Number of observations the model was fitted on
    pub n_obs: usize,
}

#[derive(Debug, Clone)]
struct InitialState {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
}

#[derive(Debug)]
struct SmoothingRun {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    fitted: Vec<f64>,
    sse: f64,
}

fn check_param(name: &str, value: f64) -> Result<f64> {
    if value <= 0.0 || value >= 1.0 || !value.is_finite() {
        return Err(MathError::InvalidInput(format!(
            "{} must be between 0 and 1 (exclusive)",
            name
        )));
    }
    Ok(value)
}

impl HoltWinters {
    /// Create a model with the given seasonal period; all smoothing
    /// parameters are estimated during `fit`
    pub fn new(seasonal_period: usize) -> Result<Self> {
        if seasonal_period < 2 {
            return Err(MathError::InvalidInput(
                "Seasonal period must be at least 2".to_string(),
            ));
        }

        Ok(Self {
            seasonal_period,
            alpha: None,
            beta: None,
            gamma: None,
            optimizer: NelderMeadConfig::default(),
        })
    }

    /// Hold the level coefficient fixed
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        self.alpha = Some(check_param("Alpha", alpha)?);
        Ok(self)
    }

    /// Hold the trend coefficient fixed
    pub fn with_beta(mut self, beta: f64) -> Result<Self> {
        self.beta = Some(check_param("Beta", beta)?);
        Ok(self)
    }

    /// Hold the seasonal coefficient fixed
    pub fn with_gamma(mut self, gamma: f64) -> Result<Self> {
        self.gamma = Some(check_param("Gamma", gamma)?);
        Ok(self)
    }

    /// Override the optimiser settings used for parameter estimation
    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn seasonal_period(&self) -> usize {
        self.seasonal_period
    }

    /// Two full seasons are needed to initialise level, trend and seasonals
    pub fn min_observations(&self) -> usize {
        2 * self.seasonal_period
    }

    /// Fit the model to `values`
    pub fn fit(&self, values: &[f64]) -> Result<FittedHoltWinters> {
        let period = self.seasonal_period;
        if values.len() < self.min_observations() {
            return Err(MathError::InsufficientData(format!(
                "Holt-Winters with seasonal period {} needs at least {} observations, got {}",
                period,
                self.min_observations(),
                values.len()
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(format!(
                "Observation {} is not a finite number",
                pos
            )));
        }

        let initial = initial_state(values, period);

        let fixed = [self.alpha, self.beta, self.gamma];
        let defaults = [DEFAULT_PARAMS.alpha, DEFAULT_PARAMS.beta, DEFAULT_PARAMS.gamma];
        let free: Vec<usize> = (0..3).filter(|&i| fixed[i].is_none()).collect();

        let assemble = |free_values: &[f64]| {
            let mut all = [0.0; 3];
            for i in 0..3 {
                all[i] = fixed[i].unwrap_or(defaults[i]);
            }
            for (slot, value) in free.iter().zip(free_values) {
                all[*slot] = *value;
            }
            SmoothingParams {
                alpha: all[0],
                beta: all[1],
                gamma: all[2],
            }
        };

        let (params, converged, iterations) = if free.is_empty() {
            (assemble(&[]), true, 0)
        } else {
            let start: Vec<f64> = free.iter().map(|&i| defaults[i]).collect();
            let bounds = vec![PARAM_BOUNDS; free.len()];
            let result = nelder_mead(
                |candidate| smooth(values, period, assemble(candidate), &initial).sse,
                &start,
                &bounds,
                &self.optimizer,
            )?;
            if !result.value.is_finite() {
                return Err(MathError::Convergence(format!(
                    "Parameter search ended with a non-finite SSE after {} iterations",
                    result.iterations
                )));
            }
            (assemble(&result.point), result.converged, result.iterations)
        };

        let run = smooth(values, period, params, &initial);
        if !run.sse.is_finite() || !run.level.is_finite() || !run.trend.is_finite() {
            return Err(MathError::Convergence(
                "Smoothing produced non-finite state".to_string(),
            ));
        }

        Ok(FittedHoltWinters {
            params,
            seasonal_period: period,
            level: run.level,
            trend: run.trend,
            seasonals: run.seasonals,
            fitted: run.fitted,
            sse: run.sse,
            converged,
            iterations,
            n_obs: values.len(),
        })
    }
}

impl FittedHoltWinters {
    /// Predict `horizon` values immediately after the fitted series
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        let period = self.seasonal_period;
        (1..=horizon)
            .map(|h| {
                let season = self.seasonals[(self.n_obs - 1 + h) % period];
                self.level + h as f64 * self.trend + season
            })
            .collect()
    }

    /// One-step-ahead errors for the smoothed part of the series
    pub fn residuals(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.len() != self.fitted.len() {
            return Err(MathError::InvalidInput(format!(
                "Expected {} observations, got {}",
                self.fitted.len(),
                values.len()
            )));
        }

        Ok(values
            .iter()
            .zip(&self.fitted)
            .skip(self.seasonal_period)
            .map(|(y, f)| y - f)
            .collect())
    }

    /// Standard deviation of the one-step-ahead errors
    pub fn residual_std_dev(&self) -> f64 {
        let dof = self.n_obs - self.seasonal_period;
        if dof == 0 {
            return 0.0;
        }
        (self.sse / dof as f64).sqrt()
    }
}

/// Heuristic initial state from the first two seasons.
///
/// The level is anchored at index `period - 1` so the recursion can start at
/// `t = period`, and the seasonals are taken from the detrended first season.
fn initial_state(values: &[f64], period: usize) -> InitialState {
    let m = period as f64;
    let first_season = &values[..period];
    let mean = first_season.iter().sum::<f64>() / m;

    let trend = (0..period)
        .map(|i| (values[period + i] - values[i]) / m)
        .sum::<f64>()
        / m;

    let centre = (m - 1.0) / 2.0;
    let mut seasonals: Vec<f64> = first_season
        .iter()
        .enumerate()
        .map(|(i, y)| y - (mean + trend * (i as f64 - centre)))
        .collect();

    let adjustment = seasonals.iter().sum::<f64>() / m;
    for s in seasonals.iter_mut() {
        *s -= adjustment;
    }

    InitialState {
        level: mean + trend * centre,
        trend,
        seasonals,
    }
}

fn smooth(
    values: &[f64],
    period: usize,
    params: SmoothingParams,
    initial: &InitialState,
) -> SmoothingRun {
    let SmoothingParams { alpha, beta, gamma } = params;
    let mut level = initial.level;
    let mut trend = initial.trend;
    let mut seasonals = initial.seasonals.clone();

    let mut fitted = Vec::with_capacity(values.len());
    fitted.extend_from_slice(&values[..period]);
    let mut sse = 0.0;

    for (t, &y) in values.iter().enumerate().skip(period) {
        let idx = t % period;
        let season = seasonals[idx];
        let one_step = level + trend + season;
        fitted.push(one_step);

        let error = y - one_step;
        sse += error * error;

        let prev_level = level;
        level = alpha * (y - season) + (1.0 - alpha) * (prev_level + trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
        seasonals[idx] = gamma * (y - level) + (1.0 - gamma) * season;
    }

    SmoothingRun {
        level,
        trend,
        seasonals,
        fitted,
        sse,
    }
}
