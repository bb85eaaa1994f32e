use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;

use crate::{
    models::{bar::Bar, request_params::HistoryRequest, table::RawTable},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InvalidCredentialSnafu, MalformedResponseSnafu,
        MissingEnvVarSnafu, ProviderError, ProviderInitError, RequestSnafu,
        broker_rest::response::{BrokerBar, HistoryResponse},
    },
};

const EXCHANGE: &str = "BCBA";
const RESOLUTION: &str = "D";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Brokerage history adapter (`/api/cotizaciones/history`).
///
/// The static session cookie acts as the credential and is passed through
/// verbatim on every request. It is never a literal in this crate: it comes
/// from the `BROKER_API_COOKIE` environment variable and lives in a
/// [`SecretString`]. The endpoint host comes from `BROKER_API_BASE_URL`.
pub struct BrokerProvider {
    client: Client,
    base_url: String,
    _cookie: SecretString,
}

impl BrokerProvider {
    pub fn new() -> Result<Self, ProviderInitError> {
        let cookie = SecretString::new(
            get_env_var("BROKER_API_COOKIE")
                .context(MissingEnvVarSnafu)?
                .into(),
        );
        let base_url = get_env_var("BROKER_API_BASE_URL").context(MissingEnvVarSnafu)?;

        let mut headers = header::HeaderMap::new();
        let mut cookie_value = header::HeaderValue::from_str(cookie.expose_secret())
            .context(InvalidCredentialSnafu)?;
        cookie_value.set_sensitive(true);
        headers.insert(header::COOKIE, cookie_value);

        let client = Client::builder()
            .timeout(TIMEOUT)
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url,
            _cookie: cookie,
        })
    }

    /// Strips any market suffix from the symbol (`GGAL.BA` -> `GGAL`).
    fn bare_symbol(symbol: &str) -> &str {
        symbol.split('.').next().unwrap_or(symbol)
    }

    /// Epoch-second bounds: start at 00:00:00, end at 23:59:59.
    ///
    /// Naive timestamps are interpreted as UTC so runs are reproducible; the
    /// endpoint's day resolution makes the offset immaterial.
    fn epoch_bounds(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
        let from = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let to = end.and_hms_opt(23, 59, 59).unwrap().and_utc().timestamp();
        (from, to)
    }

    pub(crate) fn parse_response(
        symbol: &str,
        payload: &str,
    ) -> Result<RawTable, ProviderError> {
        let response: HistoryResponse = serde_json::from_str(payload).map_err(|e| {
            MalformedResponseSnafu {
                message: format!("{e}; payload: {payload}"),
            }
            .build()
        })?;

        if !response.is_ok() {
            return MalformedResponseSnafu {
                message: format!("status was not \"ok\"; payload: {payload}"),
            }
            .fail();
        }

        let bars: Vec<Bar> = response
            .bars
            .unwrap_or_default()
            .iter()
            .map(|b| Self::to_bar(b))
            .collect::<Result<_, _>>()?;

        Ok(RawTable::from_bars(symbol, &bars))
    }

    fn to_bar(bar: &BrokerBar) -> Result<Bar, ProviderError> {
        let date = chrono::DateTime::from_timestamp(bar.time, 0)
            .map(|dt| dt.naive_utc().date())
            .ok_or_else(|| {
                MalformedResponseSnafu {
                    message: format!("invalid bar time: {}", bar.time),
                }
                .build()
            })?;
        Ok(Bar {
            date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        })
    }
}

#[async_trait]
impl DataProvider for BrokerProvider {
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<RawTable, ProviderError> {
        let symbol = Self::bare_symbol(&request.symbol);
        let (from, to) = Self::epoch_bounds(request.start, request.end);
        let url = format!("{}/api/cotizaciones/history", self.base_url);
        log::debug!(
            "GET {url}?symbolName={symbol}&exchange={EXCHANGE}&from={from}&to={to}&resolution={RESOLUTION}"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbolName", symbol),
                ("exchange", EXCHANGE),
                ("from", &from.to_string()),
                ("to", &to.to_string()),
                ("resolution", RESOLUTION),
            ])
            .send()
            .await
            .context(RequestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(RequestSnafu)?;

        if !status.is_success() {
            return ApiSnafu {
                message: format!("HTTP {status} for {symbol}: {body}"),
            }
            .fail();
        }

        Self::parse_response(&request.symbol, &body)
    }
}
