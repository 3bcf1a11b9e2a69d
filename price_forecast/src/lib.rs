//! # Price Forecast
//!
//! Short-horizon forecasting of daily price series.
//!
//! ## Features
//!
//! - CSV loading of `Date`/`Price` series into an immutable [`PriceSeries`]
//! - Inclusive date-range selection
//! - Weekly-seasonal Holt-Winters fitting (additive trend and seasonality)
//! - Forecast assembly: dated forecast, history/forecast union for charts,
//!   and a forecast table headed by the last actual price
//! - CSV and JSON exports
//!
//! ## Quick Start
//!
//! ```no_run
//! use price_forecast::{assemble, filter, DataLoader};
//!
//! # fn main() -> price_forecast::Result<()> {
//! let series = DataLoader::from_csv("data.csv")?;
//! let (start, end) = (series.first_date().unwrap(), series.last_date().unwrap());
//!
//! let window = filter(&series, start, end);
//! let assembly = assemble(&window, 7)?;
//!
//! for row in assembly.table.rows() {
//!     println!("{:>20} {:.2}", row.label, row.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod data;
pub mod error;
pub mod export;
pub mod filter;
pub mod metrics;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use crate::assemble::{
    assemble, Assembly, CombinedRow, CombinedSeries, ForecastAssembler, ForecastPoint,
    ForecastSeries, ForecastTable, Horizon, TableRow,
};
pub use crate::data::{DataLoader, PricePoint, PriceSeries};
pub use crate::error::{ForecastError, Result};
pub use crate::filter::{filter, DateRange};
pub use crate::metrics::FitSummary;
pub use crate::models::holt_winters::HoltWintersModel;
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
