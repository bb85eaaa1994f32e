use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Universal parameters for requesting daily history from any provider.
///
/// Vendor-agnostic: each [`DataProvider`](crate::providers::DataProvider)
/// implementation translates these into its own wire format. Both bounds are
/// inclusive; providers whose upstream treats the end as exclusive must
/// compensate internally.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryRequest {
    /// Ticker symbol, uppercased (e.g. "AAPL", "GGAL.BA").
    pub symbol: String,

    /// First calendar date to include.
    pub start: NaiveDate,

    /// Last calendar date to include.
    pub end: NaiveDate,
}

impl HistoryRequest {
    pub fn new(symbol: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            start,
            end,
        }
    }

    /// True when the range selects no days at all (start after end).
    pub fn is_empty_range(&self) -> bool {
        self.start > self.end
    }
}
