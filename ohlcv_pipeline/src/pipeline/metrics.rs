//! Metrics calculator: percentage columns derived from the canonical bars.
//!
//! Each metric is computed only when its input columns exist. Derived values
//! are pure functions of the series at computation time; they are recomputed
//! on every run, never persisted. Zero denominators yield "undefined"
//! (`None`) rather than infinities, the documented policy for the arithmetic
//! edge case the sources leave open.

use indexmap::IndexMap;

use crate::models::table::{BarTable, CanonicalColumn};

/// The derived percentage columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedColumn {
    /// Close-to-close change vs the previous bar, in percent.
    PctChange,
    /// High-to-low distance within the bar, in percent of the low.
    RangePct,
    /// Open-to-close distance within the bar, in percent of the open.
    BodyPct,
}

impl DerivedColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            DerivedColumn::PctChange => "Pct Change",
            DerivedColumn::RangePct => "Range %",
            DerivedColumn::BodyPct => "Body %",
        }
    }
}

/// A bar series with its derived metric columns appended.
///
/// `derived` values are `None` where the metric is undefined: the first
/// row's `PctChange`, and any row with a zero denominator.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub table: BarTable,
    pub derived: IndexMap<DerivedColumn, Vec<Option<f64>>>,
}

impl Report {
    pub fn derived_column(&self, column: DerivedColumn) -> Option<&[Option<f64>]> {
        self.derived.get(&column).map(Vec::as_slice)
    }
}

/// Rounded to 2 decimal places for display; full precision is not retained.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn pct(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(round2(numerator / denominator * 100.0))
    }
}

/// Appends the derived percentage columns to a canonical series.
pub fn compute(table: BarTable) -> Report {
    let mut derived: IndexMap<DerivedColumn, Vec<Option<f64>>> = IndexMap::new();

    if let Some(close) = table.column(CanonicalColumn::Close) {
        let mut pct_change = Vec::with_capacity(close.len());
        for i in 0..close.len() {
            let value = if i == 0 {
                // No prior reference for the first bar.
                None
            } else {
                pct(close[i] - close[i - 1], close[i - 1])
            };
            pct_change.push(value);
        }
        derived.insert(DerivedColumn::PctChange, pct_change);
    }

    if let (Some(high), Some(low)) = (
        table.column(CanonicalColumn::High),
        table.column(CanonicalColumn::Low),
    ) {
        let range_pct = high
            .iter()
            .zip(low)
            .map(|(&h, &l)| pct(h - l, l))
            .collect();
        derived.insert(DerivedColumn::RangePct, range_pct);
    }

    if let (Some(close), Some(open)) = (
        table.column(CanonicalColumn::Close),
        table.column(CanonicalColumn::Open),
    ) {
        let body_pct = close
            .iter()
            .zip(open)
            .map(|(&c, &o)| pct(c - o, o))
            .collect();
        derived.insert(DerivedColumn::BodyPct, body_pct);
    }

    Report { table, derived }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use indexmap::IndexMap;

    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    fn table(columns: Vec<(CanonicalColumn, Vec<f64>)>) -> BarTable {
        let n = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        BarTable {
            symbol: "TEST".to_string(),
            dates: (1..=n as u32).map(date).collect(),
            columns: columns.into_iter().collect::<IndexMap<_, _>>(),
        }
    }

    #[test]
    fn pct_change_is_absent_for_the_first_bar() {
        let report = compute(table(vec![(
            CanonicalColumn::Close,
            vec![100.0, 110.0, 99.0],
        )]));
        let pct_change = report.derived_column(DerivedColumn::PctChange).unwrap();
        assert_eq!(pct_change[0], None);
        assert_eq!(pct_change[1], Some(10.0));
        assert_eq!(pct_change[2], Some(-10.0));
    }

    #[test]
    fn range_pct_formula_and_rounding() {
        let report = compute(table(vec![
            (CanonicalColumn::High, vec![110.0, 101.0]),
            (CanonicalColumn::Low, vec![90.0, 99.0]),
        ]));
        let range_pct = report.derived_column(DerivedColumn::RangePct).unwrap();
        // (110-90)/90*100 = 22.222... -> 22.22
        assert_eq!(range_pct[0], Some(22.22));
        // (101-99)/99*100 = 2.0202... -> 2.02
        assert_eq!(range_pct[1], Some(2.02));
    }

    #[test]
    fn body_pct_formula() {
        let report = compute(table(vec![
            (CanonicalColumn::Open, vec![100.0, 50.0]),
            (CanonicalColumn::Close, vec![103.0, 49.0]),
        ]));
        let body_pct = report.derived_column(DerivedColumn::BodyPct).unwrap();
        assert_eq!(body_pct[0], Some(3.0));
        assert_eq!(body_pct[1], Some(-2.0));
    }

    #[test]
    fn metrics_require_their_input_columns() {
        // No Open: body_pct absent, range_pct present.
        let report = compute(table(vec![
            (CanonicalColumn::High, vec![110.0]),
            (CanonicalColumn::Low, vec![90.0]),
            (CanonicalColumn::Close, vec![100.0]),
        ]));
        assert!(report.derived_column(DerivedColumn::RangePct).is_some());
        assert!(report.derived_column(DerivedColumn::BodyPct).is_none());
        assert!(report.derived_column(DerivedColumn::PctChange).is_some());
    }

    #[test]
    fn zero_denominators_are_undefined_not_infinite() {
        let report = compute(table(vec![
            (CanonicalColumn::Open, vec![0.0]),
            (CanonicalColumn::High, vec![10.0]),
            (CanonicalColumn::Low, vec![0.0]),
            (CanonicalColumn::Close, vec![5.0]),
        ]));
        assert_eq!(report.derived_column(DerivedColumn::RangePct).unwrap()[0], None);
        assert_eq!(report.derived_column(DerivedColumn::BodyPct).unwrap()[0], None);
    }

    #[test]
    fn zero_previous_close_leaves_pct_change_undefined() {
        let report = compute(table(vec![(CanonicalColumn::Close, vec![0.0, 10.0])]));
        let pct_change = report.derived_column(DerivedColumn::PctChange).unwrap();
        assert_eq!(pct_change[1], None);
    }
}
