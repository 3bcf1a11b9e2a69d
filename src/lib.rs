//! # Riel dashboard
//!
//! Terminal dashboard over a daily Khmer riel price history: pick a date
//! range and a horizon, and see the filtered prices, a Holt-Winters forecast
//! table and a chart of both.
//!
//! ```no_run
//! use riel_dashboard::{Dashboard, DashboardConfig};
//! use price_forecast::DataLoader;
//!
//! let series = DataLoader::from_csv("data.csv").unwrap();
//! let dashboard = Dashboard::new(series, DashboardConfig::default()).unwrap();
//! let view = dashboard.render(&dashboard.default_params());
//! println!("{}", view.to_text(dashboard.config()));
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod session;

pub use chart::AsciiChart;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardParams, DashboardView, Report};
pub use error::{ConfigError, DashboardError};
pub use session::{run_session, Command, CommandError};

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file with Date and Price columns (overrides the config file)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First date of the range, defaults to the first date in the file
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last date of the range, defaults to the last date in the file
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Days to predict, 1 to 30
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=30))]
    pub horizon: Option<u16>,

    /// Read commands from stdin and re-render after each one
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Write the actual/predicted series as CSV
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Write the full report as JSON
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Debug logging for the dashboard crates
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    price_forecast::utils::parse_date(raw).ok_or_else(|| format!("cannot read '{}' as a date", raw))
}

impl Cli {
    /// One-shot runs fail when the forecast could not be produced; an
    /// interactive session already showed its errors and ends normally
    pub fn is_failure(&self, view: &DashboardView) -> bool {
        !self.interactive && !view.is_ok()
    }

    /// Apply command-line overrides on top of `defaults`
    pub fn params(&self, defaults: DashboardParams) -> DashboardParams {
        DashboardParams {
            start: self.start.unwrap_or(defaults.start),
            end: self.end.unwrap_or(defaults.end),
            horizon: self.horizon.map(usize::from).unwrap_or(defaults.horizon),
        }
    }
}
