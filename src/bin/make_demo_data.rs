//! Writes a synthetic daily riel price file for trying the dashboard
//! without real data: slow drift, a weekly cycle and seeded noise.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use price_forecast::PricePoint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::path::PathBuf;

/// Weekday offsets in riel, Monday first
const WEEKLY_CYCLE: [f64; 7] = [4.0, 2.5, 0.5, -1.0, -2.0, -3.0, -1.0];

#[derive(Parser, Debug)]
#[command(version, about = "Generate a demo riel price CSV")]
struct Args {
    /// Output CSV path
    #[arg(short, long, default_value = "data.csv")]
    output: PathBuf,

    /// Number of daily rows
    #[arg(long, default_value_t = 365)]
    days: usize,

    /// First date
    #[arg(long, default_value = "2022-01-01")]
    start: NaiveDate,

    /// Random seed, so the same arguments give the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Price on the first day
    #[arg(long, default_value_t = 4080.0)]
    base: f64,

    /// Drift per day
    #[arg(long, default_value_t = 0.05)]
    drift: f64,

    /// Standard deviation of the daily noise
    #[arg(long, default_value_t = 1.5)]
    noise: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let noise = Normal::new(0.0, args.noise).context("Noise must be a finite, non-negative value")?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Cannot create {}", args.output.display()))?;

    let mut written = 0;
    for (t, date) in args.start.iter_days().take(args.days).enumerate() {
        let weekday = date.weekday().num_days_from_monday() as usize;
        let price = args.base + args.drift * t as f64 + WEEKLY_CYCLE[weekday] + noise.sample(&mut rng);
        writer.serialize(PricePoint::new(date, (price * 100.0).round() / 100.0))?;
        written += 1;
    }
    writer.flush()?;

    log::info!(
        "Wrote {} days of prices from {} to {}",
        written,
        args.start,
        args.output.display()
    );
    Ok(())
}
