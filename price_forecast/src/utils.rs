//! Utility functions for the price_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Date formats accepted for the `Date` column and CLI arguments
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Parse a calendar date, tolerating a trailing time-of-day
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Parse a price, ignoring thousands separators and surrounding whitespace
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Infer the constant step between consecutive dates.
///
/// Fails when fewer than two dates are given or when the gaps differ.
pub fn infer_frequency(dates: &[NaiveDate]) -> Result<Duration> {
    if dates.len() < 2 {
        return Err(ForecastError::InsufficientData {
            needed: 2,
            got: dates.len(),
        });
    }

    let step = dates[1] - dates[0];
    if step <= Duration::zero() {
        return Err(ForecastError::ValidationError(format!(
            "Dates must be strictly increasing ({} then {})",
            dates[0], dates[1]
        )));
    }

    if let Some(pair) = dates.windows(2).find(|w| w[1] - w[0] != step) {
        return Err(ForecastError::IrregularFrequency(format!(
            "gap of {} day(s) between {} and {} differs from the {}-day step",
            (pair[1] - pair[0]).num_days(),
            pair[0],
            pair[1],
            step.num_days()
        )));
    }

    Ok(step)
}

/// Dates following `last` at a constant `step`
pub fn future_dates(last: NaiveDate, step: Duration, horizon: usize) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(horizon);
    let mut current = last;

    for _ in 0..horizon {
        current = current.checked_add_signed(step).ok_or_else(|| {
            ForecastError::ValidationError(format!(
                "Forecast dates after {} overflow the calendar",
                last
            ))
        })?;
        dates.push(current);
    }

    Ok(dates)
}
