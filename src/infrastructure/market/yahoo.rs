//! Volume and price signals from the Yahoo Finance v8 chart API (no auth
//! required).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::ports::market_signal::MarketSignal;
use crate::domain::values::watchlist::{SymbolClass, Watchlist};

pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Daily bars and quote metadata for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub price: f64,
    pub previous_close: f64,
    pub latest_volume: Option<f64>,
    /// Daily volumes before the latest bar.
    pub prior_volumes: Vec<f64>,
}

impl MarketSnapshot {
    pub fn change_pct(&self) -> f64 {
        if self.previous_close > 0.0 {
            (self.price - self.previous_close) / self.previous_close * 100.0
        } else {
            0.0
        }
    }

    /// `(latest / mean(prior) - 1) / 4`, clamped to [0,1]: 5x normal volume
    /// saturates the score.
    pub fn volume_spike_score(&self) -> Option<f64> {
        let latest = self.latest_volume?;
        if self.prior_volumes.is_empty() {
            return None;
        }
        let mean = self.prior_volumes.iter().sum::<f64>() / self.prior_volumes.len() as f64;
        if mean <= 0.0 {
            return None;
        }
        Some(((latest / mean - 1.0) / 4.0).clamp(0.0, 1.0))
    }

    /// Absolute day change, 10% saturating the score.
    pub fn price_momentum_score(&self) -> f64 {
        (self.change_pct().abs() / 10.0).clamp(0.0, 1.0)
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    regular_market_volume: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, serde::Deserialize)]
struct Quote {
    #[serde(default)]
    volume: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}

type CachedSnapshot = Arc<OnceCell<Result<MarketSnapshot, String>>>;

/// Chart client with a per-instance snapshot cache, so the volume and price
/// signals for a symbol share one request.
pub struct YahooChartClient {
    client: reqwest::Client,
    base_url: String,
    crypto: HashSet<String>,
    cache: Mutex<HashMap<String, CachedSnapshot>>,
}

impl YahooChartClient {
    pub fn new(watchlist: &Watchlist) -> Self {
        Self::with_base_url(watchlist, YAHOO_CHART_URL)
    }

    pub fn with_base_url(watchlist: &Watchlist, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            crypto: watchlist
                .entries()
                .filter(|(_, class)| *class == SymbolClass::Crypto)
                .map(|(s, _)| s.to_string())
                .collect(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Crypto tickers are quoted against USD (`BTC` → `BTC-USD`).
    pub fn quote_symbol(&self, symbol: &str) -> String {
        if self.crypto.contains(symbol) {
            format!("{symbol}-USD")
        } else {
            symbol.to_string()
        }
    }

    pub async fn snapshot(&self, symbol: &str) -> Result<MarketSnapshot, DomainError> {
        let cell = {
            let mut cache = self
                .cache
                .lock()
                .map_err(|e| DomainError::MarketData(e.to_string()))?;
            Arc::clone(cache.entry(symbol.to_string()).or_default())
        };
        cell.get_or_init(|| async { self.fetch(symbol).await.map_err(|e| e.to_string()) })
            .await
            .clone()
            .map_err(DomainError::MarketData)
    }

    async fn fetch(&self, symbol: &str) -> Result<MarketSnapshot, DomainError> {
        let quote_symbol = self.quote_symbol(symbol);
        let url = format!("{}/{quote_symbol}?range=1mo&interval=1d", self.base_url);
        debug!(symbol, url = %url, "fetching chart");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::MarketData(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::MarketData(format!(
                "Yahoo API returned {} for {quote_symbol}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::MarketData(e.to_string()))?;
        parse_chart(&body, &quote_symbol)
    }
}

pub fn parse_chart(body: &str, quote_symbol: &str) -> Result<MarketSnapshot, DomainError> {
    let data: ChartResponse =
        serde_json::from_str(body).map_err(|e| DomainError::Parse(e.to_string()))?;

    if let Some(err) = data.chart.error {
        return Err(DomainError::MarketData(format!("Yahoo error: {err}")));
    }

    let results = data
        .chart
        .result
        .ok_or_else(|| DomainError::MarketData("No chart results".into()))?;
    let chart = results
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::MarketData("Empty chart results".into()))?;

    let quote = chart.indicators.and_then(|i| i.quote.into_iter().next());
    let mut volumes: Vec<f64> = quote
        .as_ref()
        .map(|q| q.volume.iter().flatten().copied().collect())
        .unwrap_or_default();
    let closes: Vec<f64> = quote
        .as_ref()
        .map(|q| q.close.iter().flatten().copied().collect())
        .unwrap_or_default();

    let price = chart
        .meta
        .regular_market_price
        .or_else(|| closes.last().copied())
        .ok_or_else(|| DomainError::MarketData(format!("No price for {quote_symbol}")))?;

    // Prefer the prior daily close; chartPreviousClose is the close before
    // the whole range.
    let previous_close = closes
        .len()
        .checked_sub(2)
        .map(|i| closes[i])
        .or(chart.meta.previous_close)
        .or(chart.meta.chart_previous_close)
        .unwrap_or(price);

    let latest_volume = volumes.pop().or(chart.meta.regular_market_volume);

    Ok(MarketSnapshot {
        price,
        previous_close,
        latest_volume,
        prior_volumes: volumes,
    })
}

pub struct YahooVolumeSignal {
    client: Arc<YahooChartClient>,
}

impl YahooVolumeSignal {
    pub fn new(client: Arc<YahooChartClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MarketSignal for YahooVolumeSignal {
    fn name(&self) -> &str {
        "yahoo_volume_spike"
    }

    async fn score(&self, symbol: &str) -> Result<f64, DomainError> {
        self.client
            .snapshot(symbol)
            .await?
            .volume_spike_score()
            .ok_or_else(|| DomainError::MarketData(format!("No volume history for {symbol}")))
    }
}

pub struct YahooPriceSignal {
    client: Arc<YahooChartClient>,
}

impl YahooPriceSignal {
    pub fn new(client: Arc<YahooChartClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MarketSignal for YahooPriceSignal {
    fn name(&self) -> &str {
        "yahoo_price_movement"
    }

    async fn score(&self, symbol: &str) -> Result<f64, DomainError> {
        Ok(self.client.snapshot(symbol).await?.price_momentum_score())
    }
}
