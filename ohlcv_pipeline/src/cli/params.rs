//! Parse helpers for the command-line surface.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::request_params::HistoryRequest;

/// Earliest supported start date, matching the original UI's date picker.
pub const MIN_START: NaiveDate = match NaiveDate::from_ymd_opt(1980, 1, 1) {
    Some(date) => date,
    None => unreachable!(),
};

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Invalid date {input:?} (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Start date {start} is before the minimum 1980-01-01")]
    StartTooEarly { start: NaiveDate },

    #[error("Symbol must not be empty")]
    EmptySymbol,
}

pub fn parse_date(input: &str) -> Result<NaiveDate, ParamsError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| ParamsError::InvalidDate {
        input: input.to_string(),
    })
}

/// Builds a validated request from raw CLI strings.
///
/// The symbol is trimmed and uppercased; the start date must be on or after
/// [`MIN_START`]. An end-before-start range is deliberately allowed through:
/// the pipeline turns it into a no-data signal, not an error.
pub fn build_request(symbol: &str, start: &str, end: &str) -> Result<HistoryRequest, ParamsError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ParamsError::EmptySymbol);
    }

    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start < MIN_START {
        return Err(ParamsError::StartTooEarly { start });
    }

    Ok(HistoryRequest::new(symbol, start, end))
}
