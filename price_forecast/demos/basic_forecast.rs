use chrono::NaiveDate;
use price_forecast::{assemble, filter, PriceSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Price Forecast: Basic Holt-Winters Example");
    println!("==========================================\n");

    let series = create_sample_daily_data()?;
    println!(
        "Sample data: {} daily prices from {} to {}\n",
        series.len(),
        series.first_date().ok_or("empty series")?,
        series.last_date().ok_or("empty series")?
    );

    // Fit on the last eight weeks only
    let start = NaiveDate::from_ymd_opt(2023, 2, 5).ok_or("bad date")?;
    let end = NaiveDate::from_ymd_opt(2023, 4, 1).ok_or("bad date")?;
    let window = filter(&series, start, end);
    println!("Window {} to {}: {} prices", start, end, window.len());

    let assembly = assemble(&window, 10)?;
    println!("\n{}", assembly.fit);

    println!("Predicted prices:");
    for row in assembly.table.rows() {
        println!("  {:<18} {:>10.2}", row.label, row.value);
    }

    println!("\nPrediction intervals:");
    for point in assembly.forecast.points() {
        if let (Some(lo), Some(hi)) = (point.lower, point.upper) {
            println!("  {}  {:>10.2} .. {:<10.2}", point.date, lo, hi);
        }
    }

    Ok(())
}

/// Three months of riel prices with drift and a weekday pattern
fn create_sample_daily_data() -> Result<PriceSeries, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).ok_or("bad date")?;
    let prices: Vec<f64> = (0..90)
        .map(|t| {
            let weekly = [3.0, 1.5, -0.5, -2.0, -1.0, 0.5, -1.5][t % 7];
            let wobble = ((t as f64) * 0.9).sin() * 0.8;
            4085.0 + 0.12 * t as f64 + weekly + wobble
        })
        .collect();
    Ok(PriceSeries::daily(start, &prices)?)
}
