//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, a unified interface for
//! fetching daily history from any vendor. Each concrete adapter
//! ([`yahoo_chart`] for the public chart API, [`broker_rest`] for the
//! brokerage history endpoint) implements it behind vendor-specific wire
//! logic.
//!
//! The trait is async and supports dynamic dispatch (`Box<dyn DataProvider>`)
//! so the source can be selected at runtime from the CLI.

pub mod broker_rest;
pub mod yahoo_chart;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};
use thiserror::Error;

use crate::models::{request_params::HistoryRequest, table::RawTable};

/// Trait for fetching daily bar history from a market data provider.
///
/// Implementations are pure given their inputs: no shared state, no caching
/// across calls, no retry. One request maps to one upstream fetch.
#[async_trait]
pub trait DataProvider {
    /// Fetches daily history for the inclusive date range in `request`.
    ///
    /// Returns the provider's rows as a [`RawTable`] with vendor-labeled
    /// columns; schema normalization happens downstream.
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<RawTable, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// A required credential environment variable is not set.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// Failed to build the HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The credential contains characters that cannot go into a header.
    #[snafu(display("Invalid credential format: {source}"))]
    InvalidCredential {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a [`DataProvider`] implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// Transport-level failure (connection error, timeout, non-JSON body).
    #[snafu(display("API request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider answered with a non-success status or error payload.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The response parsed, but expected fields were missing or the status
    /// flag was not "ok". Carries the raw payload for diagnosis.
    #[snafu(display("Malformed response: {message}"))]
    MalformedResponse {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },
}

#[derive(Debug, Error)]
#[error("Unknown data source: {input} (expected \"yahoo\" or \"broker\")")]
pub struct SourceParseError {
    pub input: String,
}

/// The source selector: which of the two adapters serves a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Source {
    /// Public market-data provider (Yahoo v8 chart API).
    #[default]
    Yahoo,
    /// Brokerage history endpoint (cookie-authenticated).
    Broker,
}

impl Source {
    pub fn parse(input: &str) -> Result<Self, SourceParseError> {
        match input.trim().to_lowercase().as_str() {
            "yahoo" | "primary" => Ok(Source::Yahoo),
            "broker" | "secondary" => Ok(Source::Broker),
            _ => Err(SourceParseError {
                input: input.to_string(),
            }),
        }
    }

    /// Builds the adapter for this source.
    ///
    /// Selected at runtime, hence the boxed trait object.
    pub fn provider(self) -> Result<Box<dyn DataProvider>, ProviderInitError> {
        match self {
            Source::Yahoo => Ok(Box::new(yahoo_chart::YahooChartProvider::new()?)),
            Source::Broker => Ok(Box::new(broker_rest::BrokerProvider::new()?)),
        }
    }
}
