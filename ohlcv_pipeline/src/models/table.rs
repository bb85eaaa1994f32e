//! Tabular containers the pipeline stages pass between each other.
//!
//! Providers hand back a [`RawTable`] whose column labels are whatever the
//! vendor used on the wire (case variants, ticker-qualified headers). The
//! normalizer maps that onto a [`BarTable`] keyed by [`CanonicalColumn`],
//! which is the only shape the aggregator and metrics stages accept.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::models::bar::Bar;

/// A raw column label: the primary name plus an optional secondary
/// qualifier (e.g. the ticker in a multi-level header like `("Close", "AAPL")`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabel {
    pub name: String,
    pub qualifier: Option<String>,
}

impl ColumnLabel {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: None,
        }
    }

    pub fn qualified(name: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: Some(qualifier.into()),
        }
    }
}

/// One labeled column of provider data, parallel to the table's date index.
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub label: ColumnLabel,
    pub values: Vec<f64>,
}

/// Provider output before schema normalization.
///
/// Column identity is still ambiguous at this point; only the date index is
/// trusted. Every column's `values` has the same length as `dates`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// The symbol this data represents (e.g. "AAPL", "GGAL").
    pub symbol: String,
    /// Date index, one entry per row. Not necessarily sorted or unique yet.
    pub dates: Vec<NaiveDate>,
    /// Labeled columns in provider order.
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Builds a raw table with plain lowercase OHLCV labels from parsed bars.
    ///
    /// Used by providers whose wire format already maps 1:1 onto [`Bar`].
    pub fn from_bars(symbol: impl Into<String>, bars: &[Bar]) -> Self {
        let dates = bars.iter().map(|b| b.date).collect();
        let columns = vec![
            RawColumn {
                label: ColumnLabel::plain("open"),
                values: bars.iter().map(|b| b.open).collect(),
            },
            RawColumn {
                label: ColumnLabel::plain("high"),
                values: bars.iter().map(|b| b.high).collect(),
            },
            RawColumn {
                label: ColumnLabel::plain("low"),
                values: bars.iter().map(|b| b.low).collect(),
            },
            RawColumn {
                label: ColumnLabel::plain("close"),
                values: bars.iter().map(|b| b.close).collect(),
            },
            RawColumn {
                label: ColumnLabel::plain("volume"),
                values: bars.iter().map(|b| b.volume).collect(),
            },
        ];
        Self {
            symbol: symbol.into(),
            dates,
            columns,
        }
    }
}

/// The five normalized field names used internally after schema mapping.
///
/// `ALL` fixes the canonical output order: Open, High, Low, Close, Volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalColumn {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl CanonicalColumn {
    pub const ALL: [CanonicalColumn; 5] = [
        CanonicalColumn::Open,
        CanonicalColumn::High,
        CanonicalColumn::Low,
        CanonicalColumn::Close,
        CanonicalColumn::Volume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalColumn::Open => "Open",
            CanonicalColumn::High => "High",
            CanonicalColumn::Low => "Low",
            CanonicalColumn::Close => "Close",
            CanonicalColumn::Volume => "Volume",
        }
    }
}

/// A normalized bar series over canonical columns.
///
/// Invariants (established by the normalizer, preserved by the aggregator):
/// the date index is strictly increasing with no duplicates, and `columns`
/// holds only the canonical columns actually present, in canonical order.
/// Missing columns are never synthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct BarTable {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub columns: IndexMap<CanonicalColumn, Vec<f64>>,
}

impl BarTable {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn has(&self, column: CanonicalColumn) -> bool {
        self.columns.contains_key(&column)
    }

    pub fn column(&self, column: CanonicalColumn) -> Option<&[f64]> {
        self.columns.get(&column).map(Vec::as_slice)
    }
}
