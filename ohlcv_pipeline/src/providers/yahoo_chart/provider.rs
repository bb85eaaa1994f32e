use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use reqwest::Client;
use snafu::ResultExt;

use crate::{
    models::{
        request_params::HistoryRequest,
        table::{ColumnLabel, RawColumn, RawTable},
    },
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, MalformedResponseSnafu, ProviderError,
        ProviderInitError, RequestSnafu,
        yahoo_chart::response::{ChartData, ChartResponse},
    },
};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo asks for a real browser UA; the default reqwest one gets blocked.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const TIMEOUT: Duration = Duration::from_secs(10);

/// Public market-data adapter against Yahoo's v8 chart API.
///
/// Needs no credential. The upstream treats the end of the range as
/// exclusive, so [`chart_url`](Self::chart_url) extends it by one day to
/// honor the inclusive [`HistoryRequest`] contract.
pub struct YahooChartProvider {
    client: Client,
}

impl YahooChartProvider {
    pub fn new() -> Result<Self, ProviderInitError> {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self { client })
    }

    /// Builds the chart API URL for a symbol and inclusive date range.
    fn chart_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let period1 = start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        // Upstream end-exclusive: request up to the start of end + 1 day.
        let exclusive_end = end.checked_add_days(Days::new(1)).unwrap_or(end);
        let period2 = exclusive_end
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp();
        format!(
            "{BASE_URL}/{symbol}?period1={period1}&period2={period2}&interval=1d&includeAdjustedClose=true"
        )
    }

    /// Parses the chart payload into a raw table with ticker-qualified labels.
    ///
    /// Rows with an incomplete quote (nulls on non-trading days) are skipped.
    pub(crate) fn parse_response(
        symbol: &str,
        response: ChartResponse,
    ) -> Result<RawTable, ProviderError> {
        let result = match response.chart.result {
            Some(result) => result,
            None => {
                let message = match response.chart.error {
                    Some(err) => format!("{}: {}", err.code, err.description),
                    None => "empty result with no error".to_string(),
                };
                return MalformedResponseSnafu { message }.fail();
            }
        };

        let data: ChartData = result.into_iter().next().ok_or_else(|| {
            MalformedResponseSnafu {
                message: "result array is empty",
            }
            .build()
        })?;

        let timestamps = data.timestamp.ok_or_else(|| {
            MalformedResponseSnafu {
                message: "no timestamps in result",
            }
            .build()
        })?;

        let quote = data.indicators.quote.into_iter().next().ok_or_else(|| {
            MalformedResponseSnafu {
                message: "no quote data in result",
            }
            .build()
        })?;

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        let mut dates = Vec::with_capacity(timestamps.len());
        let mut open = Vec::with_capacity(timestamps.len());
        let mut high = Vec::with_capacity(timestamps.len());
        let mut low = Vec::with_capacity(timestamps.len());
        let mut close = Vec::with_capacity(timestamps.len());
        let mut adj_close = Vec::with_capacity(timestamps.len());
        let mut volume = Vec::with_capacity(timestamps.len());

        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    MalformedResponseSnafu {
                        message: format!("invalid timestamp: {ts}"),
                    }
                    .build()
                })?;

            let row = (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
                quote.volume.get(i).copied().flatten(),
            );
            let (Some(o), Some(h), Some(l), Some(c), Some(v)) = row else {
                continue;
            };

            dates.push(date);
            open.push(o);
            high.push(h);
            low.push(l);
            close.push(c);
            adj_close.push(
                adj_closes
                    .as_ref()
                    .and_then(|a| a.get(i).copied().flatten())
                    .unwrap_or(c),
            );
            volume.push(v as f64);
        }

        // Ticker-qualified labels mirror the upstream multi-level headers;
        // the normalizer collapses them to the primary name.
        let columns = vec![
            RawColumn {
                label: ColumnLabel::qualified("Open", symbol),
                values: open,
            },
            RawColumn {
                label: ColumnLabel::qualified("High", symbol),
                values: high,
            },
            RawColumn {
                label: ColumnLabel::qualified("Low", symbol),
                values: low,
            },
            RawColumn {
                label: ColumnLabel::qualified("Close", symbol),
                values: close,
            },
            RawColumn {
                label: ColumnLabel::qualified("Adj Close", symbol),
                values: adj_close,
            },
            RawColumn {
                label: ColumnLabel::qualified("Volume", symbol),
                values: volume,
            },
        ];

        Ok(RawTable {
            symbol: symbol.to_string(),
            dates,
            columns,
        })
    }
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    async fn fetch_history(&self, request: &HistoryRequest) -> Result<RawTable, ProviderError> {
        let url = Self::chart_url(&request.symbol, request.start, request.end);
        log::debug!("GET {url}");

        let response = self.client.get(&url).send().await.context(RequestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return ApiSnafu {
                message: format!("HTTP {status} for {}: {body}", request.symbol),
            }
            .fail();
        }

        let chart: ChartResponse = response.json().await.context(RequestSnafu)?;
        Self::parse_response(&request.symbol, chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1672657200, 1672743600, 1672830000],
                "indicators": {
                    "quote": [{
                        "open":   [130.28, 126.89, null],
                        "high":   [130.9,  128.66, null],
                        "low":    [124.17, 125.08, null],
                        "close":  [125.07, 126.36, null],
                        "volume": [112117500, 89113600, null]
                    }],
                    "adjclose": [{"adjclose": [124.21, 125.5, null]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_fixture_into_qualified_columns() {
        let response: ChartResponse = serde_json::from_str(FIXTURE).unwrap();
        let table = YahooChartProvider::parse_response("AAPL", response).unwrap();

        // The all-null third row (non-trading day) is skipped.
        assert_eq!(table.len(), 2);
        let names: Vec<&str> = table
            .columns
            .iter()
            .map(|c| c.label.name.as_str())
            .collect();
        assert_eq!(names, ["Open", "High", "Low", "Close", "Adj Close", "Volume"]);
        assert!(
            table
                .columns
                .iter()
                .all(|c| c.label.qualifier.as_deref() == Some("AAPL"))
        );
        assert_eq!(table.columns[3].values, [125.07, 126.36]);
        assert_eq!(table.columns[4].values, [124.21, 125.5]);
    }

    #[test]
    fn error_payload_is_malformed_response() {
        let payload = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        }"#;
        let response: ChartResponse = serde_json::from_str(payload).unwrap();
        let err = YahooChartProvider::parse_response("NOPE", response).unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn chart_url_extends_end_by_one_day() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let url = YahooChartProvider::chart_url("AAPL", start, end);

        // 2023-01-01T00:00:00Z and 2023-02-01T00:00:00Z
        assert!(url.contains("period1=1672531200"));
        assert!(url.contains("period2=1675209600"));
        assert!(url.contains("/AAPL?"));
        assert!(url.contains("interval=1d"));
    }
}
