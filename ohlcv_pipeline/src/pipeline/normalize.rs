//! Schema normalizer: raw provider columns onto the canonical OHLCV set.
//!
//! Tolerates the two providers' heterogeneous schemas: composite
//! ticker-qualified headers collapse to the primary label, a case-insensitive
//! alias table maps variants (`OPEN`, `Adj Close`, ...) onto canonical names,
//! and anything unrecognized is dropped. Missing canonical columns stay
//! missing; downstream stages skip what isn't there.

use indexmap::IndexMap;

use crate::models::table::{BarTable, CanonicalColumn, RawTable};

/// Maps a raw column name onto its canonical column, case-insensitively.
///
/// `Adj Close` intentionally maps to Close: when both are present the first
/// column in table order wins, which is the unadjusted Close for the primary
/// provider.
fn canonical_for(name: &str) -> Option<CanonicalColumn> {
    match name.trim().to_lowercase().as_str() {
        "open" => Some(CanonicalColumn::Open),
        "high" => Some(CanonicalColumn::High),
        "low" => Some(CanonicalColumn::Low),
        "close" | "adj close" | "adjclose" | "last" => Some(CanonicalColumn::Close),
        "volume" | "vol" => Some(CanonicalColumn::Volume),
        _ => None,
    }
}

/// Normalizes a raw table into a canonical [`BarTable`].
///
/// Also coerces the date index into strictly increasing order (stable sort,
/// duplicate dates keep the first row), which the aggregator requires.
/// Idempotent: normalizing already-canonical output is a no-op.
pub fn normalize(raw: RawTable) -> BarTable {
    let mut columns: IndexMap<CanonicalColumn, Vec<f64>> = IndexMap::new();

    // First matching column wins per canonical target; output order is
    // fixed regardless of provider order.
    for canonical in CanonicalColumn::ALL {
        let matched = raw
            .columns
            .iter()
            .find(|c| canonical_for(&c.label.name) == Some(canonical));
        if let Some(column) = matched {
            columns.insert(canonical, column.values.clone());
        }
    }

    let table = BarTable {
        symbol: raw.symbol,
        dates: raw.dates,
        columns,
    };
    sort_and_dedupe(table)
}

/// Reorders rows by date (stable) and drops duplicate dates, keeping the
/// first occurrence.
fn sort_and_dedupe(table: BarTable) -> BarTable {
    let already_ordered = table.dates.windows(2).all(|w| w[0] < w[1]);
    if already_ordered {
        return table;
    }

    let mut order: Vec<usize> = (0..table.dates.len()).collect();
    order.sort_by_key(|&i| table.dates[i]);

    let mut dates = Vec::with_capacity(order.len());
    let mut keep = Vec::with_capacity(order.len());
    for &i in &order {
        if dates.last() == Some(&table.dates[i]) {
            continue;
        }
        dates.push(table.dates[i]);
        keep.push(i);
    }

    let columns = table
        .columns
        .into_iter()
        .map(|(name, values)| {
            let reordered = keep.iter().map(|&i| values[i]).collect();
            (name, reordered)
        })
        .collect();

    BarTable {
        symbol: table.symbol,
        dates,
        columns,
    }
}
