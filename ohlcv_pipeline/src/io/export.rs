//! CSV export for machine consumption.
//!
//! Writes the report under a per-application folder in the system temp
//! directory with a `{symbol}_{timestamp}_{uuid}.csv` filename, and returns
//! the path so callers can print it for downstream tooling.

use std::path::{Path, PathBuf};
use std::{env, fs};

use chrono::Utc;
use uuid::Uuid;

use crate::errors::Error;
use crate::pipeline::metrics::Report;

/// Writes a report as CSV into `$TMPDIR/ohlcv_pipeline/`.
pub fn write_report_to_temp(report: &Report, symbol: &str) -> Result<PathBuf, Error> {
    let mut base_temp = env::temp_dir();
    base_temp.push("ohlcv_pipeline");
    if !base_temp.exists() {
        fs::create_dir_all(&base_temp)?;
    }

    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let filename = format!("{}_{}_{}.csv", symbol, timestamp, Uuid::new_v4());
    let output_path = base_temp.join(filename);

    write_report(report, &output_path)?;
    Ok(output_path)
}

/// Writes a report as CSV to an explicit path.
///
/// Header order matches the rendered table: Date, canonical columns,
/// derived columns. Undefined derived values become empty cells.
pub fn write_report(report: &Report, path: &Path) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["Date".to_string()];
    header.extend(report.table.columns.keys().map(|c| c.as_str().to_string()));
    header.extend(report.derived.keys().map(|c| c.as_str().to_string()));
    writer.write_record(&header)?;

    for (i, date) in report.table.dates.iter().enumerate() {
        let mut record = vec![date.to_string()];
        for values in report.table.columns.values() {
            record.push(values[i].to_string());
        }
        for values in report.derived.values() {
            record.push(values[i].map(|v| v.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
