use chrono::NaiveDate;
use price_forecast::assemble::LAST_ACTUAL_LABEL;
use price_forecast::export::write_combined_csv;
use price_forecast::{assemble, filter, DataLoader, DateRange, ForecastError};
use std::io::Write;
use tempfile::NamedTempFile;

// Six weeks of daily riel prices with a weekly rhythm
fn create_sample_data() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Price").unwrap();

    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    for (t, day) in start.iter_days().take(42).enumerate() {
        let price = 4090.0 + 0.5 * t as f64 + [3.0, 1.0, -2.0, 0.0, -1.0, 2.0, -3.0][t % 7];
        writeln!(file, "{},{}", day, price).unwrap();
    }

    file
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_full_forecast_workflow() {
    // 1. Load data
    let data_file = create_sample_data();
    let series = DataLoader::from_csv(data_file.path()).unwrap();
    assert_eq!(series.len(), 42);

    // 2. Default range covers the whole file
    let range = DateRange::covering(&series).unwrap();
    assert_eq!(range, DateRange::new(date(2023, 1, 1), date(2023, 2, 11)));

    // 3. Narrow the window
    let window = filter(&series, date(2023, 1, 8), date(2023, 2, 4));
    assert_eq!(window.len(), 28);

    // 4. Forecast
    let assembly = assemble(&window, 7).unwrap();
    assert_eq!(assembly.forecast.len(), 7);
    assert_eq!(assembly.forecast.dates()[0], date(2023, 2, 5));
    assert_eq!(assembly.combined.len(), 28 + 7);
    assert_eq!(assembly.table.rows()[0].label, LAST_ACTUAL_LABEL);
    assert_eq!(
        assembly.table.rows()[0].value,
        series.get(date(2023, 2, 4)).unwrap()
    );

    // 5. The held-out week is recovered from trend plus cycle
    for point in assembly.forecast.points() {
        let actual = series.get(point.date).unwrap();
        assert!((point.predicted - actual).abs() < 1e-6);
    }

    // 6. Export the chart data
    let mut buf = Vec::new();
    write_combined_csv(&assembly.combined, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 36);
}

#[test]
fn test_parameter_changes_recompute_from_scratch() {
    let data_file = create_sample_data();
    let series = DataLoader::from_csv(data_file.path()).unwrap();

    let short = assemble(&filter(&series, date(2023, 1, 1), date(2023, 1, 21)), 3).unwrap();
    let long = assemble(&filter(&series, date(2023, 1, 1), date(2023, 2, 11)), 10).unwrap();

    assert_eq!(short.forecast.dates()[0], date(2023, 1, 22));
    assert_eq!(long.forecast.dates()[0], date(2023, 2, 12));
    assert_eq!(short.table.len(), 4);
    assert_eq!(long.table.len(), 11);

    // The loaded series itself is untouched
    assert_eq!(series.len(), 42);
}

#[test]
fn test_error_paths() {
    let data_file = create_sample_data();
    let series = DataLoader::from_csv(data_file.path()).unwrap();

    let inverted = filter(&series, date(2023, 2, 1), date(2023, 1, 1));
    assert!(matches!(
        assemble(&inverted, 7),
        Err(ForecastError::ValidationError(_))
    ));

    let five_days = filter(&series, date(2023, 1, 1), date(2023, 1, 5));
    assert!(matches!(
        assemble(&five_days, 7),
        Err(ForecastError::InsufficientData { .. })
    ));

    let result = DataLoader::from_csv("/nonexistent/path.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}
