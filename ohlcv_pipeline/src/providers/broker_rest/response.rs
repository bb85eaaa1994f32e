//! Serde mapping of the brokerage history endpoint response.
//!
//! Wire contract: `{status: "ok" | other, bars: [{time, open, high, low,
//! close, volume}, ...]}` with `time` in epoch seconds. Anything other than
//! `status == "ok"` plus a present `bars` array is treated as malformed.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub status: String,
    pub bars: Option<Vec<BrokerBar>>,
}

#[derive(Debug, Deserialize)]
pub struct BrokerBar {
    /// Bar timestamp in epoch seconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl HistoryResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok" && self.bars.is_some()
    }
}
