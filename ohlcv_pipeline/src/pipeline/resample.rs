//! Period aggregator: daily bars into Monday-anchored weekly or calendar
//! monthly buckets.
//!
//! Aggregation rules are fixed per column: Open = first, High = max,
//! Low = min, Close = last, Volume = sum. Only columns present in the input
//! participate; buckets with no underlying bars never appear in the output.

use chrono::{Datelike, Days, Duration, NaiveDate};
use indexmap::IndexMap;

use crate::models::{
    period::Period,
    table::{BarTable, CanonicalColumn},
};

/// The Monday of the calendar week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The last day of the calendar month containing `date`.
fn month_end(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .checked_sub_days(Days::new(1))
        .unwrap()
}

fn merge(column: CanonicalColumn, accumulated: f64, value: f64) -> f64 {
    match column {
        CanonicalColumn::Open => accumulated,
        CanonicalColumn::High => accumulated.max(value),
        CanonicalColumn::Low => accumulated.min(value),
        CanonicalColumn::Close => value,
        CanonicalColumn::Volume => accumulated + value,
    }
}

/// Collapses a daily series into the requested period.
///
/// Daily is the identity. Weekly buckets are labeled by the bucket's Monday,
/// monthly buckets by the month end. Precondition: the input index is
/// strictly increasing (the normalizer guarantees it), so each bucket's rows
/// are consecutive.
pub fn aggregate(table: &BarTable, period: Period) -> BarTable {
    if period == Period::Daily || table.is_empty() {
        return table.clone();
    }

    let label_for = |date: NaiveDate| match period {
        Period::Daily => date,
        Period::Weekly => week_start(date),
        Period::Monthly => month_end(date),
    };

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut columns: IndexMap<CanonicalColumn, Vec<f64>> = table
        .columns
        .keys()
        .map(|&c| (c, Vec::new()))
        .collect();

    for (i, &date) in table.dates.iter().enumerate() {
        let label = label_for(date);
        let new_bucket = dates.last() != Some(&label);
        if new_bucket {
            dates.push(label);
        }

        for (&column, values) in columns.iter_mut() {
            let value = table.columns[&column][i];
            if new_bucket {
                values.push(value);
            } else {
                let last = values.last_mut().unwrap();
                *last = merge(column, *last, value);
            }
        }
    }

    BarTable {
        symbol: table.symbol.clone(),
        dates,
        columns,
    }
}
