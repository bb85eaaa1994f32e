//! The four-stage pipeline: fetch -> normalize -> aggregate -> metrics.
//!
//! Data flows strictly forward; no stage holds state across invocations.
//! [`run`] drives a full run against a provider, [`run_stages`] is the pure
//! tail of the pipeline so tests and callers with their own data can skip
//! the network.

pub mod metrics;
pub mod normalize;
pub mod ranking;
pub mod resample;

use crate::{
    errors::Error,
    models::{period::Period, request_params::HistoryRequest, table::RawTable},
    pipeline::metrics::Report,
    providers::DataProvider,
};

/// Runs the pure stages over already-fetched provider output.
pub fn run_stages(raw: RawTable, period: Period) -> Result<Report, Error> {
    if raw.is_empty() {
        return Err(Error::NoData { symbol: raw.symbol });
    }
    let table = normalize::normalize(raw);
    let table = resample::aggregate(&table, period);
    Ok(metrics::compute(table))
}

/// One full pipeline run: fetch daily history, then normalize, aggregate
/// and derive metrics.
///
/// An inverted date range is reported as no-data before any fetch happens,
/// matching the "empty result, not an exception" contract.
pub async fn run(
    provider: &dyn DataProvider,
    request: &HistoryRequest,
    period: Period,
) -> Result<Report, Error> {
    if request.is_empty_range() {
        log::debug!(
            "empty range for {}: {} > {}",
            request.symbol,
            request.start,
            request.end
        );
        return Err(Error::NoData {
            symbol: request.symbol.clone(),
        });
    }

    let raw = provider.fetch_history(request).await?;
    run_stages(raw, period)
}
