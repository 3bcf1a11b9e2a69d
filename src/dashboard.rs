//! The dashboard: one loaded series, re-rendered for every parameter change

use crate::chart::AsciiChart;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use chrono::NaiveDate;
use log::{debug, info};
use price_forecast::{
    filter, Assembly, DateRange, ForecastAssembler, ForecastError, ForecastModel, Horizon,
    HoltWintersModel, PriceSeries,
};
use serde::Serialize;
use std::fmt::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// User-controlled inputs of one render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardParams {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub horizon: usize,
}

#[derive(Debug)]
pub struct Dashboard {
    series: PriceSeries,
    full_range: DateRange,
    assembler: ForecastAssembler<HoltWintersModel>,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(series: PriceSeries, config: DashboardConfig) -> Result<Self, DashboardError> {
        let full_range = DateRange::covering(&series).ok_or(DashboardError::EmptySeries)?;
        let model = HoltWintersModel::new(config.seasonal_period)?
            .with_confidence_level(config.confidence_level)?;
        let assembler = ForecastAssembler::new(model);
        info!(
            "Dashboard ready with {} prices ({} to {}), {}",
            series.len(),
            full_range.start,
            full_range.end,
            assembler.model().name()
        );

        Ok(Self {
            series,
            full_range,
            assembler,
            config,
        })
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Display name of the forecasting model
    pub fn model_name(&self) -> &str {
        self.assembler.model().name()
    }

    /// Whole series and the configured horizon
    pub fn default_params(&self) -> DashboardParams {
        DashboardParams {
            start: self.full_range.start,
            end: self.full_range.end,
            horizon: self.config.default_horizon,
        }
    }

    /// Filter and forecast from scratch for `params`
    pub fn render(&self, params: &DashboardParams) -> DashboardView {
        let filtered = filter(&self.series, params.start, params.end);
        debug!(
            "Rendering {} to {} ({} rows), horizon {}",
            params.start,
            params.end,
            filtered.len(),
            params.horizon
        );
        let outcome = Horizon::new(params.horizon)
            .and_then(|horizon| self.assembler.assemble(&filtered, horizon));

        DashboardView {
            params: *params,
            filtered,
            outcome,
        }
    }
}

/// Result of one render; a failed forecast still carries the filtered rows
#[derive(Debug)]
pub struct DashboardView {
    pub params: DashboardParams,
    pub filtered: PriceSeries,
    pub outcome: Result<Assembly, ForecastError>,
}

/// Serializable form of a view, for JSON export
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub title: &'a str,
    pub params: DashboardParams,
    pub observations: usize,
    pub history: &'a PriceSeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<&'a Assembly>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Predicted Price")]
    value: String,
    #[tabled(rename = "Interval")]
    interval: String,
}

impl DashboardView {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn assembly(&self) -> Option<&Assembly> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ForecastError> {
        self.outcome.as_ref().err()
    }

    pub fn report<'a>(&'a self, config: &'a DashboardConfig) -> Report<'a> {
        Report {
            title: &config.title,
            params: self.params,
            observations: self.filtered.len(),
            history: &self.filtered,
            assembly: self.assembly(),
            error: self.error().map(|e| e.to_string()),
        }
    }

    /// Full text rendering: dataset, forecast table, chart and fit
    pub fn to_text(&self, config: &DashboardConfig) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", config.title);
        let _ = writeln!(
            out,
            "Range: {} to {}   Horizon: {} day(s)   Observations: {}",
            self.params.start,
            self.params.end,
            self.params.horizon,
            self.filtered.len()
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "Khmer(riel) Stock Price Dataset");
        if self.filtered.is_empty() {
            let _ = writeln!(out, "(no rows in the selected date range)");
        } else {
            let shown = config.table_rows.min(self.filtered.len());
            let skip = self.filtered.len() - shown;
            if skip > 0 {
                let _ = writeln!(out, "(last {} of {} rows)", shown, self.filtered.len());
            }
            let rows = self.filtered.iter().skip(skip).map(|p| PriceRow {
                date: p.date.to_string(),
                price: format!("{:.2}", p.price),
            });
            let _ = writeln!(out, "{}", Table::new(rows).with(Style::sharp()));
        }
        let _ = writeln!(out);

        match &self.outcome {
            Ok(assembly) => {
                let _ = writeln!(out, "Predicted Prices");
                let _ = writeln!(out, "{}", prediction_table(assembly));
                let _ = writeln!(out);

                let chart = AsciiChart::new(config.chart.width, config.chart.height);
                out.push_str(&chart.render(&assembly.combined));
                let _ = writeln!(out);

                let _ = write!(out, "{}", assembly.fit);
            }
            Err(err) => {
                let _ = writeln!(out, "Error: {}", err);
            }
        }
        out
    }
}

fn prediction_table(assembly: &Assembly) -> String {
    let intervals = std::iter::once(String::new()).chain(assembly.forecast.points().iter().map(
        |p| match (p.lower, p.upper) {
            (Some(lo), Some(hi)) => format!("{:.2} .. {:.2}", lo, hi),
            _ => String::new(),
        },
    ));
    let rows = assembly
        .table
        .rows()
        .iter()
        .zip(intervals)
        .map(|(row, interval)| PredictionRow {
            label: row.label.clone(),
            value: format!("{:.2}", row.value),
            interval,
        });
    Table::new(rows).with(Style::sharp()).to_string()
}
