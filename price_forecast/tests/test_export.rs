use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use price_forecast::export::{save_combined_csv, save_json, to_json, write_combined_csv};
use price_forecast::{assemble, PriceSeries};
use tempfile::tempdir;

fn history() -> PriceSeries {
    let prices: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
    PriceSeries::daily(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), &prices).unwrap()
}

#[test]
fn test_combined_csv_layout() {
    let assembly = assemble(&history(), 2).unwrap();

    let mut buf = Vec::new();
    write_combined_csv(&assembly.combined, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 1 + 14 + 2);
    assert_eq!(lines[0], "Date,Actual Price,Predicted Price");
    assert_eq!(lines[1], "2023-01-01,100.0,");
    assert_eq!(lines[14], "2023-01-14,113.0,");
    assert!(lines[15].starts_with("2023-01-15,,"));
    assert!(lines[16].starts_with("2023-01-16,,"));
}

#[test]
fn test_json_report() {
    let assembly = assemble(&history(), 3).unwrap();

    let json = to_json(&assembly).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["horizon"], 3);
    assert_eq!(value["table"][0]["label"], "Last Actual Price");
    assert_eq!(value["table"][0]["value"], 113.0);
    assert_eq!(value["forecast"].as_array().unwrap().len(), 3);
    assert_eq!(value["combined"][0]["Date"], "2023-01-01");
}

#[test]
fn test_save_files() {
    let dir = tempdir().unwrap();
    let assembly = assemble(&history(), 1).unwrap();

    let csv_path = dir.path().join("combined.csv");
    let json_path = dir.path().join("report.json");
    save_combined_csv(&assembly.combined, &csv_path).unwrap();
    save_json(&assembly, &json_path).unwrap();

    assert_eq!(std::fs::read_to_string(&csv_path).unwrap().lines().count(), 16);
    assert!(std::fs::read_to_string(&json_path)
        .unwrap()
        .contains("Predicted Price"));
}
