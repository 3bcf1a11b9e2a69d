//! Forecast assembly
//!
//! Turns a filtered history into the three artifacts the dashboard shows:
//! the dated forecast, the history/forecast union for charting, and the
//! forecast table headed by the last actual price.

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use crate::metrics::FitSummary;
use crate::models::holt_winters::HoltWintersModel;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::utils::{future_dates, infer_frequency};
use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Smallest accepted horizon
pub const MIN_HORIZON: usize = 1;
/// Largest accepted horizon
pub const MAX_HORIZON: usize = 30;
/// Horizon used when none is requested
pub const DEFAULT_HORIZON: usize = 7;

/// Label of the first forecast table row
pub const LAST_ACTUAL_LABEL: &str = "Last Actual Price";
/// Column holding historical prices
pub const ACTUAL_COLUMN: &str = "Actual Price";
/// Column holding forecast prices
pub const PREDICTED_COLUMN: &str = "Predicted Price";

/// Number of future periods to forecast, always within `[1, 30]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Horizon(usize);

impl Horizon {
    pub fn new(periods: usize) -> Result<Self> {
        if !(MIN_HORIZON..=MAX_HORIZON).contains(&periods) {
            return Err(ForecastError::InvalidParameter(format!(
                "Horizon must be between {} and {}, got {}",
                MIN_HORIZON, MAX_HORIZON, periods
            )));
        }
        Ok(Self(periods))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self(DEFAULT_HORIZON)
    }
}

impl TryFrom<usize> for Horizon {
    type Error = ForecastError;

    fn try_from(periods: usize) -> Result<Self> {
        Self::new(periods)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One predicted value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// Predicted prices on the dates following the history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted).collect()
    }
}

/// A chart row; at most one column is set since history and forecast never overlap
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombinedRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Actual Price")]
    pub actual: Option<f64>,
    #[serde(rename = "Predicted Price")]
    pub predicted: Option<f64>,
}

/// Date-ordered outer join of history and forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CombinedSeries {
    rows: Vec<CombinedRow>,
}

impl CombinedSeries {
    /// Union of both inputs keyed by date
    pub fn join(history: &PriceSeries, forecast: &ForecastSeries) -> Self {
        let mut rows: BTreeMap<NaiveDate, CombinedRow> = BTreeMap::new();
        let blank = |date| CombinedRow {
            date,
            actual: None,
            predicted: None,
        };

        for point in history {
            rows.entry(point.date).or_insert_with(|| blank(point.date)).actual = Some(point.price);
        }
        for point in forecast.points() {
            rows.entry(point.date)
                .or_insert_with(|| blank(point.date))
                .predicted = Some(point.predicted);
        }

        Self {
            rows: rows.into_values().collect(),
        }
    }

    pub fn rows(&self) -> &[CombinedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A labelled forecast table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub value: f64,
}

/// Last actual price followed by every forecast value in date order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastTable {
    rows: Vec<TableRow>,
}

impl ForecastTable {
    fn build(last_actual: f64, forecast: &ForecastSeries) -> Self {
        let mut rows = Vec::with_capacity(forecast.len() + 1);
        rows.push(TableRow {
            label: LAST_ACTUAL_LABEL.to_string(),
            value: last_actual,
        });
        rows.extend(forecast.points().iter().map(|p| TableRow {
            label: p.date.to_string(),
            value: p.predicted,
        }));
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything derived from one history window and horizon
#[derive(Debug, Clone, Serialize)]
pub struct Assembly {
    pub horizon: Horizon,
    /// Inferred spacing of the history, in days
    pub step_days: i64,
    pub forecast: ForecastSeries,
    pub combined: CombinedSeries,
    pub table: ForecastTable,
    pub fit: FitSummary,
}

/// Fits a model to a history window and assembles its forecast
#[derive(Debug, Clone)]
pub struct ForecastAssembler<M: ForecastModel = HoltWintersModel> {
    model: M,
}

impl ForecastAssembler<HoltWintersModel> {
    /// Assembler backed by a weekly-seasonal Holt-Winters model
    pub fn weekly() -> Result<Self> {
        Ok(Self::new(HoltWintersModel::weekly()?))
    }
}

impl<M: ForecastModel> ForecastAssembler<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Forecast `horizon` periods past the end of `history`.
    ///
    /// Fails before fitting when the window is empty, shorter than the model
    /// requires, or unevenly spaced.
    pub fn assemble(&self, history: &PriceSeries, horizon: Horizon) -> Result<Assembly> {
        let last = history.last().ok_or_else(|| {
            ForecastError::ValidationError(
                "No price data in the selected date range".to_string(),
            )
        })?;

        let needed = self.model.min_observations();
        if history.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: history.len(),
            });
        }

        let step = infer_frequency(&history.dates())?;
        let dates = future_dates(last.date, step, horizon.get())?;
        debug!(
            "Forecasting {} periods of {} day(s) after {}",
            horizon,
            step.num_days(),
            last.date
        );

        let trained = self.model.train(history)?;
        let result = trained.forecast(horizon.get())?;
        if result.values().len() != dates.len() {
            return Err(ForecastError::ForecastingError(format!(
                "{} returned {} values for a horizon of {}",
                trained.name(),
                result.values().len(),
                horizon
            )));
        }

        let points = dates
            .iter()
            .zip(result.values())
            .enumerate()
            .map(|(i, (date, value))| {
                let interval = result.intervals().map(|iv| iv[i]);
                ForecastPoint {
                    date: *date,
                    predicted: *value,
                    lower: interval.map(|(lo, _)| lo),
                    upper: interval.map(|(_, hi)| hi),
                }
            })
            .collect();
        let forecast = ForecastSeries { points };

        let combined = CombinedSeries::join(history, &forecast);
        let table = ForecastTable::build(last.price, &forecast);
        let fit = trained.summary()?;
        info!(
            "Assembled {}-period forecast from {} observations ({})",
            horizon,
            history.len(),
            trained.name()
        );

        Ok(Assembly {
            horizon,
            step_days: step.num_days(),
            forecast,
            combined,
            table,
            fit,
        })
    }
}

/// Forecast `horizon` periods past `history` with the weekly Holt-Winters model
pub fn assemble(history: &PriceSeries, horizon: usize) -> Result<Assembly> {
    let horizon = Horizon::new(horizon)?;
    ForecastAssembler::weekly()?.assemble(history, horizon)
}
