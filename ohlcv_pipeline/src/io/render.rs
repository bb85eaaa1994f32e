//! Text rendering of reports and rankings.
//!
//! Stands in for the original's table and scatter widgets: fixed-order,
//! fixed-width columns, `-` for undefined values, data on stdout so it
//! survives shell redirection.

use crate::pipeline::{metrics::Report, ranking::RankedBar};

const DATE_WIDTH: usize = 12;
const CELL_WIDTH: usize = 14;

fn cell(value: f64) -> String {
    format!("{value:>CELL_WIDTH$.2}")
}

fn opt_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => cell(v),
        None => format!("{:>CELL_WIDTH$}", "-"),
    }
}

/// Renders a report as an aligned text table, one row per bar.
///
/// Canonical columns come first in their fixed order, derived columns after.
pub fn render_table(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<DATE_WIDTH$}", "Date"));
    for column in report.table.columns.keys() {
        out.push_str(&format!("{:>CELL_WIDTH$}", column.as_str()));
    }
    for column in report.derived.keys() {
        out.push_str(&format!("{:>CELL_WIDTH$}", column.as_str()));
    }
    out.push('\n');

    for (i, date) in report.table.dates.iter().enumerate() {
        out.push_str(&format!("{:<DATE_WIDTH$}", date.to_string()));
        for values in report.table.columns.values() {
            out.push_str(&cell(values[i]));
        }
        for values in report.derived.values() {
            out.push_str(&opt_cell(values[i]));
        }
        out.push('\n');
    }

    out
}

/// Renders a volatility ranking grouped by calendar year.
pub fn render_ranking(symbol: &str, ranked: &[RankedBar]) -> String {
    let mut out = format!("Most volatile days for {symbol}\n");

    let mut current_year = None;
    for entry in ranked {
        if current_year != Some(entry.year) {
            out.push_str(&format!("{}\n", entry.year));
            current_year = Some(entry.year);
        }
        out.push_str(&format!(
            "  {:<DATE_WIDTH$}{:>8.2}%\n",
            entry.date.to_string(),
            entry.range_pct
        ));
    }

    out
}
