//! End-to-end pipeline tests over handmade provider output. No network.

use chrono::NaiveDate;
use ohlcv_pipeline::errors::Error;
use ohlcv_pipeline::models::period::Period;
use ohlcv_pipeline::models::table::{CanonicalColumn, ColumnLabel, RawColumn, RawTable};
use ohlcv_pipeline::pipeline::metrics::DerivedColumn;
use ohlcv_pipeline::pipeline::run_stages;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn col(name: &str, values: Vec<f64>) -> RawColumn {
    RawColumn {
        label: ColumnLabel::plain(name),
        values,
    }
}

/// One Mon-Fri week of messy provider output, labels in mixed case.
fn messy_week() -> RawTable {
    RawTable {
        symbol: "TEST".to_string(),
        dates: (2..=6).map(|d| date(2023, 1, d)).collect(),
        columns: vec![
            col("CLOSE", vec![10.0, 12.0, 11.0, 13.0, 14.0]),
            col("volume", vec![100.0, 200.0, 300.0, 400.0, 500.0]),
            col("OPEN", vec![9.0, 10.5, 12.0, 11.0, 13.0]),
            col("high", vec![10.5, 12.5, 12.2, 13.5, 14.5]),
            col("Low", vec![8.5, 10.0, 10.8, 10.9, 12.8]),
            col("Dividends", vec![0.0; 5]),
        ],
    }
}

#[test]
fn daily_run_produces_all_metrics() {
    let report = run_stages(messy_week(), Period::Daily).unwrap();

    assert_eq!(report.table.len(), 5);
    let names: Vec<&str> = report.table.columns.keys().map(|c| c.as_str()).collect();
    assert_eq!(names, ["Open", "High", "Low", "Close", "Volume"]);

    let pct_change = report.derived_column(DerivedColumn::PctChange).unwrap();
    assert_eq!(pct_change[0], None);
    assert_eq!(pct_change[1], Some(20.0)); // (12-10)/10

    let body_pct = report.derived_column(DerivedColumn::BodyPct).unwrap();
    assert_eq!(body_pct[0], Some(11.11)); // (10-9)/9 = 11.111...
}

#[test]
fn weekly_run_collapses_the_week() {
    let report = run_stages(messy_week(), Period::Weekly).unwrap();

    assert_eq!(report.table.dates, [date(2023, 1, 2)]);
    assert_eq!(report.table.column(CanonicalColumn::Open).unwrap(), [9.0]);
    assert_eq!(report.table.column(CanonicalColumn::High).unwrap(), [14.5]);
    assert_eq!(report.table.column(CanonicalColumn::Low).unwrap(), [8.5]);
    assert_eq!(report.table.column(CanonicalColumn::Close).unwrap(), [14.0]);
    assert_eq!(
        report.table.column(CanonicalColumn::Volume).unwrap(),
        [1500.0]
    );

    // A single aggregated bar still gets its intrabar metrics.
    let range_pct = report.derived_column(DerivedColumn::RangePct).unwrap();
    assert_eq!(range_pct[0], Some(70.59)); // (14.5-8.5)/8.5 = 70.588...
}

#[test]
fn missing_open_drops_body_pct_only() {
    let mut raw = messy_week();
    raw.columns.retain(|c| !c.label.name.eq_ignore_ascii_case("open"));

    let report = run_stages(raw, Period::Daily).unwrap();
    assert!(!report.table.has(CanonicalColumn::Open));
    assert!(report.derived_column(DerivedColumn::RangePct).is_some());
    assert!(report.derived_column(DerivedColumn::BodyPct).is_none());
    assert!(report.derived_column(DerivedColumn::PctChange).is_some());
}

#[test]
fn empty_provider_output_is_no_data() {
    let raw = RawTable {
        symbol: "TEST".to_string(),
        dates: vec![],
        columns: vec![],
    };
    match run_stages(raw, Period::Daily) {
        Err(Error::NoData { symbol }) => assert_eq!(symbol, "TEST"),
        other => panic!("expected NoData, got {other:?}"),
    }
}
