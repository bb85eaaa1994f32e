use thiserror::Error;

use crate::providers::ProviderError;

/// The unified error type for the `ohlcv_pipeline` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested range produced no bars. Informational, not fatal: the
    /// caller surfaces it as a message, not a failure.
    #[error("No data available for {symbol} in the requested date range")]
    NoData { symbol: String },

    /// An error originating from a data provider (network, API, payload).
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// An error while exporting a report to CSV.
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors that should be shown as information rather than
    /// reported as a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, Error::NoData { .. })
    }
}
