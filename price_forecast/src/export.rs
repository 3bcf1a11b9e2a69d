//! CSV and JSON exports of assembled forecasts

use crate::assemble::CombinedSeries;
use crate::error::Result;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the combined series as `Date,Actual Price,Predicted Price` rows.
///
/// Missing values are left as empty fields.
pub fn write_combined_csv<W: Write>(combined: &CombinedSeries, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in combined.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the combined series to a CSV file
pub fn save_combined_csv<P: AsRef<Path>>(combined: &CombinedSeries, path: P) -> Result<()> {
    let path = path.as_ref();
    write_combined_csv(combined, File::create(path)?)?;
    info!("Wrote {} chart rows to {}", combined.len(), path.display());
    Ok(())
}

/// Pretty-printed JSON for any report
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Save a report as pretty-printed JSON
pub fn save_json<T: Serialize, P: AsRef<Path>>(report: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path)?;
    file.write_all(to_json(report)?.as_bytes())?;
    info!("Wrote report to {}", path.display());
    Ok(())
}
