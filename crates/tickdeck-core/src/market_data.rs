//! Client for the external aggregates (OHLC) API.
//!
//! Both endpoints go through one request path with one error contract: every
//! call returns a tagged result, never a silent null on one path and a thrown
//! error on another.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

use crate::http_client::{HttpAuth, HttpClient, HttpError, HttpRequest};
use crate::{format_iso_date, OhlcBar, Ticker, UtcTimestamp, ValidationError};

pub const DEFAULT_BASE_URL: &str = "https://api.polygon.io";

/// Failure reasons for a market-data call.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("market data transport failed: {0}")]
    Transport(#[from] HttpError),

    #[error("market data upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("market data response failed to decode: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Normalized window of bars for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggsWindow {
    pub ticker: Ticker,
    pub bars: Vec<OhlcBar>,
}

/// HTTP client for the aggregates API.
pub struct MarketDataClient {
    http: Arc<dyn HttpClient>,
    auth: HttpAuth,
    base_url: String,
}

impl MarketDataClient {
    pub fn new(http: Arc<dyn HttpClient>, auth: HttpAuth) -> Self {
        Self {
            http,
            auth,
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Most recent completed daily bar for `ticker`.
    pub async fn previous_close(&self, ticker: &Ticker) -> Result<AggsWindow, MarketDataError> {
        let url = format!(
            "{}/v2/aggs/ticker/{}/prev",
            self.base_url,
            urlencoding::encode(ticker.as_str())
        );
        self.fetch_window(ticker, &url).await
    }

    /// Daily bars for `ticker` over the inclusive `[from, to]` date range.
    pub async fn range(
        &self,
        ticker: &Ticker,
        from: Date,
        to: Date,
    ) -> Result<AggsWindow, MarketDataError> {
        let url = format!(
            "{}/v2/aggs/ticker/{}/range/1/day/{}/{}",
            self.base_url,
            urlencoding::encode(ticker.as_str()),
            format_iso_date(from),
            format_iso_date(to)
        );
        self.fetch_window(ticker, &url).await
    }

    async fn fetch_window(
        &self,
        ticker: &Ticker,
        url: &str,
    ) -> Result<AggsWindow, MarketDataError> {
        let request = HttpRequest::get(url).with_auth(&self.auth);
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            return Err(MarketDataError::Status {
                status: response.status,
                body: response.body,
            });
        }

        let bars = parse_aggs_json(&response.body)?;
        Ok(AggsWindow {
            ticker: ticker.clone(),
            bars,
        })
    }
}

/// Decode aggregates JSON into validated bars. Accepts a full
/// `{"results": [...]}` document or a bare array of rows; a document
/// without `results` decodes as an empty window.
pub fn parse_aggs_json(input: &str) -> Result<Vec<OhlcBar>, MarketDataError> {
    let document: AggsDocument = serde_json::from_str(input)?;
    let rows = match document {
        AggsDocument::Document { results } => results,
        AggsDocument::Rows(rows) => rows,
    };

    let mut bars = Vec::with_capacity(rows.len());
    for row in rows {
        bars.push(row.into_bar()?);
    }
    Ok(bars)
}

/// Wire shape of an aggregates response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AggsDocument {
    Document {
        #[serde(default)]
        results: Vec<AggsRow>,
    },
    Rows(Vec<AggsRow>),
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct AggsRow {
    #[serde(rename = "t")]
    timestamp_ms: i64,
    #[serde(rename = "o")]
    open: f64,
    #[serde(rename = "h")]
    high: f64,
    #[serde(rename = "l")]
    low: f64,
    #[serde(rename = "c")]
    close: f64,
    #[serde(rename = "v", default)]
    volume: Option<f64>,
}

impl AggsRow {
    fn into_bar(self) -> Result<OhlcBar, ValidationError> {
        let ts = UtcTimestamp::from_unix_millis(self.timestamp_ms)?;
        let volume = self.volume.map(|v| v.max(0.0) as u64);
        OhlcBar::new(ts, self.open, self.high, self.low, self.close, volume)
    }
}
