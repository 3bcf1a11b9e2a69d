//! Daily price series and CSV loading

use crate::error::{ForecastError, Result};
use crate::utils::{parse_date, parse_price};
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Name of the required date column
pub const DATE_COLUMN: &str = "Date";
/// Name of the required price column
pub const PRICE_COLUMN: &str = "Price";

/// A single observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Price")]
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Price observations ordered by strictly increasing date.
///
/// There is no mutating API: a series is built once and only read or
/// sliced afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

/// Data loader for price series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a price series from a CSV file with `Date` and `Price` columns
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        let series = Self::from_dataframe(&df)?;
        info!(
            "Loaded {} price records from {}",
            series.len(),
            path.display()
        );
        Ok(series)
    }

    /// Build a price series from an existing DataFrame
    pub fn from_dataframe(df: &DataFrame) -> Result<PriceSeries> {
        let dates = Self::required_column(df, DATE_COLUMN)?.cast(&DataType::Utf8)?;
        let prices = Self::required_column(df, PRICE_COLUMN)?;

        let dates: Vec<NaiveDate> = dates
            .utf8()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                let raw = value.ok_or_else(|| {
                    ForecastError::DataError(format!("Row {}: missing {}", row + 1, DATE_COLUMN))
                })?;
                parse_date(raw).ok_or_else(|| {
                    ForecastError::DataError(format!("Row {}: unparseable date '{}'", row + 1, raw))
                })
            })
            .collect::<Result<_>>()?;

        let prices = Self::price_values(prices)?;
        debug!("Parsed {} rows from data frame", dates.len());

        PriceSeries::new(dates, prices)
    }

    fn required_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
        df.column(name).map_err(|_| {
            ForecastError::DataError(format!(
                "Missing required column '{}' (found: {})",
                name,
                df.get_column_names().join(", ")
            ))
        })
    }

    /// Numeric prices, accepting text columns with thousands separators
    fn price_values(col: &Series) -> Result<Vec<f64>> {
        let missing =
            |row: usize| ForecastError::DataError(format!("Row {}: missing {}", row + 1, PRICE_COLUMN));

        match col.dtype() {
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .enumerate()
                .map(|(row, value)| {
                    let raw = value.ok_or_else(|| missing(row))?;
                    parse_price(raw).ok_or_else(|| {
                        ForecastError::DataError(format!(
                            "Row {}: unparseable price '{}'",
                            row + 1,
                            raw
                        ))
                    })
                })
                .collect(),
            _ => {
                let cast = col.cast(&DataType::Float64)?;
                cast.f64()?
                    .into_iter()
                    .enumerate()
                    .map(|(row, value)| value.ok_or_else(|| missing(row)))
                    .collect()
            }
        }
    }
}

impl PriceSeries {
    /// Create a series from parallel date and price vectors.
    ///
    /// Rows are sorted chronologically; duplicate dates and non-finite prices
    /// are rejected.
    pub fn new(dates: Vec<NaiveDate>, prices: Vec<f64>) -> Result<Self> {
        if dates.len() != prices.len() {
            return Err(ForecastError::DataError(format!(
                "Got {} dates but {} prices",
                dates.len(),
                prices.len()
            )));
        }

        let points = dates
            .into_iter()
            .zip(prices)
            .map(|(date, price)| PricePoint { date, price })
            .collect();
        Self::from_points(points)
    }

    /// Create a series from unordered points
    pub fn from_points(mut points: Vec<PricePoint>) -> Result<Self> {
        if let Some(bad) = points.iter().find(|p| !p.price.is_finite()) {
            return Err(ForecastError::DataError(format!(
                "Price on {} is not a finite number",
                bad.date
            )));
        }

        points.sort_by_key(|p| p.date);
        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ForecastError::DataError(format!(
                "Duplicate date {}",
                pair[0].date
            )));
        }

        Ok(Self { points })
    }

    /// Consecutive daily prices starting at `start`
    pub fn daily(start: NaiveDate, prices: &[f64]) -> Result<Self> {
        let dates = start
            .iter_days()
            .take(prices.len())
            .collect::<Vec<_>>();
        if dates.len() != prices.len() {
            return Err(ForecastError::DataError(
                "Date range overflows the calendar".to_string(),
            ));
        }
        Self::new(dates, prices.to_vec())
    }

    /// Wrap points that are already sorted and unique
    pub(crate) fn from_sorted(points: Vec<PricePoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last().map(|p| p.date)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Price recorded on `date`, if any
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| self.points[idx].price)
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
