//! Serde mapping of the Yahoo v8 chart API response.
//!
//! The payload carries a timestamp array plus parallel per-field arrays under
//! `indicators.quote[0]`, with nulls on non-trading days. Yahoo has no
//! official API contract, so every level is optional and checked at parse
//! time.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartResult,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub result: Option<Vec<ChartData>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartData {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    pub quote: Vec<QuoteData>,
    pub adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteData {
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
pub struct AdjCloseData {
    pub adjclose: Vec<Option<f64>>,
}
