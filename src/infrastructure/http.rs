use crate::domain::{
    errors::{AppError, AppResult},
    logging::{LogComponent, get_logger},
    market_data::{Bar, BarSequence, MarketDataRepository, OHLCV, Price, Symbol, Timestamp, Volume},
};
use futures::future::{FutureExt, LocalBoxFuture};
use gloo::net::http::Request;
use serde::{Deserialize, Serialize};

/// One bar as the proxy sends it: `{t, o, h, l, c, v, n, vw}` with `t` in RFC 3339
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDto {
    pub t: String,
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
    pub v: f64,
    #[serde(default)]
    pub n: Option<u64>,
    #[serde(default)]
    pub vw: Option<f64>,
}

impl BarDto {
    pub fn to_bar(&self) -> AppResult<Bar> {
        let timestamp = Timestamp::parse_rfc3339(&self.t)
            .map_err(|e| AppError::Decode(format!("invalid bar timestamp '{}': {}", self.t, e)))?;
        let ohlcv = OHLCV::new(
            Price::from(self.o),
            Price::from(self.h),
            Price::from(self.l),
            Price::from(self.c),
            Volume::from(self.v),
        );

        let bar = Bar::new(timestamp, ohlcv);
        Ok(match (self.n, self.vw) {
            (Some(n), Some(vw)) => bar.with_trade_stats(n, Price::from(vw)),
            _ => bar,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDto {
    pub t: String,
    #[serde(default)]
    pub x: String,
    pub p: f64,
    pub s: f64,
    #[serde(default)]
    pub c: Vec<String>,
    #[serde(default)]
    pub i: Option<u64>,
    #[serde(default)]
    pub z: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteDto {
    pub t: String,
    #[serde(default)]
    pub ax: String,
    pub ap: f64,
    #[serde(rename = "as")]
    pub ask_size: f64,
    #[serde(default)]
    pub bx: String,
    pub bp: f64,
    pub bs: f64,
    #[serde(default)]
    pub c: Vec<String>,
    #[serde(default)]
    pub z: String,
}

impl QuoteDto {
    pub fn spread(&self) -> f64 {
        self.ap - self.bp
    }
}

/// `GET {base}/market-data/{symbol}` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshotDto {
    pub symbol: String,
    #[serde(default)]
    pub latest_trade: Option<TradeDto>,
    #[serde(default)]
    pub latest_quote: Option<QuoteDto>,
    #[serde(default)]
    pub recent_bars: Vec<BarDto>,
}

impl MarketSnapshotDto {
    /// Bars in the order the proxy sent them. One bad timestamp rejects the whole snapshot.
    pub fn to_bar_sequence(&self) -> AppResult<BarSequence> {
        let bars = self.recent_bars.iter().map(BarDto::to_bar).collect::<AppResult<Vec<_>>>()?;
        Ok(BarSequence::new(bars))
    }
}

pub fn decode_snapshot(json: &str) -> AppResult<MarketSnapshotDto> {
    serde_json::from_str(json).map_err(|e| AppError::Decode(format!("invalid market snapshot: {}", e)))
}

/// Decode a bare `[{t,o,h,l,c,v,...}]` array.
pub fn decode_bars(json: &str) -> AppResult<BarSequence> {
    let dtos: Vec<BarDto> =
        serde_json::from_str(json).map_err(|e| AppError::Decode(format!("invalid bar array: {}", e)))?;
    let bars = dtos.iter().map(BarDto::to_bar).collect::<AppResult<Vec<_>>>()?;
    Ok(BarSequence::new(bars))
}

/// HTTP client for the dashboard's brokerage proxy
#[derive(Debug, Clone)]
pub struct AlpacaProxyClient {
    base_url: String,
}

impl AlpacaProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn snapshot_url(&self, symbol: &Symbol) -> String {
        format!("{}/market-data/{}", self.base_url, symbol.value())
    }

    pub async fn fetch_snapshot(&self, symbol: &Symbol) -> AppResult<MarketSnapshotDto> {
        let url = self.snapshot_url(symbol);
        get_logger().info(LogComponent::Infrastructure("AlpacaProxyClient"), &format!("GET {}", url));

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("failed to send request: {}", e)))?;

        if !response.ok() {
            return Err(AppError::Network(format!(
                "HTTP error: {} {}",
                response.status(),
                response.status_text()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("failed to read body: {}", e)))?;
        let snapshot = decode_snapshot(&body)?;

        get_logger().info(
            LogComponent::Infrastructure("AlpacaProxyClient"),
            &format!("received {} bars for {}", snapshot.recent_bars.len(), snapshot.symbol),
        );
        Ok(snapshot)
    }
}

impl MarketDataRepository for AlpacaProxyClient {
    fn fetch_bars<'a>(&'a self, symbol: &'a Symbol) -> LocalBoxFuture<'a, Result<BarSequence, AppError>> {
        async move { self.fetch_snapshot(symbol).await?.to_bar_sequence() }.boxed_local()
    }
}
