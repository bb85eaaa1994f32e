//! Volatility ranking: the top-N bars by intraday range percentage.
//!
//! Presentation helper for the "most volatile days" view. Ties keep input
//! (chronological) order; rows whose range is undefined are excluded.

use chrono::{Datelike, NaiveDate};

use crate::pipeline::metrics::{DerivedColumn, Report};

pub const DEFAULT_TOP_N: usize = 50;

/// One ranked entry, carrying the calendar year for grouped display.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedBar {
    pub date: NaiveDate,
    pub year: i32,
    pub range_pct: f64,
}

/// Ranks the top `n` bars by `range_pct` descending.
///
/// Returns an empty vector when the report has no range column (e.g. High
/// or Low was missing upstream).
pub fn top_volatile(report: &Report, n: usize) -> Vec<RankedBar> {
    let Some(range_pct) = report.derived_column(DerivedColumn::RangePct) else {
        return Vec::new();
    };

    let mut ranked: Vec<RankedBar> = report
        .table
        .dates
        .iter()
        .zip(range_pct)
        .filter_map(|(&date, &value)| {
            value.map(|range_pct| RankedBar {
                date,
                year: date.year(),
                range_pct,
            })
        })
        .collect();

    // Stable sort: equal ranges keep chronological order.
    ranked.sort_by(|a, b| b.range_pct.total_cmp(&a.range_pct));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::models::table::{BarTable, CanonicalColumn};
    use crate::pipeline::metrics::compute;

    fn report(highs: Vec<f64>, lows: Vec<f64>) -> Report {
        let n = highs.len();
        let mut columns = IndexMap::new();
        columns.insert(CanonicalColumn::High, highs);
        columns.insert(CanonicalColumn::Low, lows);
        compute(BarTable {
            symbol: "TEST".to_string(),
            dates: (0..n)
                .map(|i| {
                    NaiveDate::from_ymd_opt(2022 + i as i32 / 300, 1, 1 + i as u32 % 28).unwrap()
                })
                .collect(),
            columns,
        })
    }

    #[test]
    fn ranks_descending_and_truncates() {
        let r = report(
            vec![101.0, 110.0, 105.0, 120.0],
            vec![100.0, 100.0, 100.0, 100.0],
        );
        let top = top_volatile(&r, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].range_pct, 20.0);
        assert_eq!(top[1].range_pct, 10.0);
    }

    #[test]
    fn ties_keep_chronological_order() {
        let r = report(vec![110.0, 110.0, 105.0], vec![100.0, 100.0, 100.0]);
        let top = top_volatile(&r, 3);
        assert_eq!(top[0].range_pct, 10.0);
        assert_eq!(top[1].range_pct, 10.0);
        assert!(top[0].date < top[1].date);
    }

    #[test]
    fn undefined_ranges_are_excluded() {
        let r = report(vec![110.0, 120.0], vec![0.0, 100.0]);
        let top = top_volatile(&r, 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].range_pct, 20.0);
    }

    #[test]
    fn missing_range_column_yields_empty() {
        let mut columns = IndexMap::new();
        columns.insert(CanonicalColumn::Close, vec![10.0]);
        let r = compute(BarTable {
            symbol: "TEST".to_string(),
            dates: vec![NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()],
            columns,
        });
        assert!(top_volatile(&r, 10).is_empty());
    }
}
