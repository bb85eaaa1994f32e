//! Canonical in-memory representation of a single price bar (OHLCV).
//!
//! Providers parse their wire formats into rows of this shape before the
//! pipeline takes over. The struct is vendor-agnostic.

use chrono::NaiveDate;

/// One sampling period's price/volume record.
///
/// `date` is the trading day for daily bars, or the period start (weekly) /
/// period end (monthly) after aggregation. Timezone-naive throughout.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Calendar date for this bar.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval. Kept as `f64` because weekly
    /// and monthly sums (and some provider payloads) are not guaranteed
    /// integral.
    pub volume: f64,
}
