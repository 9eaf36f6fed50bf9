//! Domain types plus re-exports of the shared `dalal-types` primitives.

use core::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

pub use dalal_types::{
    CacheConfig, Capability, ConnectorKey, DalalConfig, DalalError, FetchStrategy,
    IndicatorConfig, WindowAdjust,
};
pub use rust_decimal::Decimal as Price;

/// A validated exchange ticker (e.g. `RELIANCE`, `M&M`, `BAJAJ-AUTO`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Longest ticker accepted.
    pub const MAX_LEN: usize = 20;

    /// Trim and upper-case `raw`, rejecting empty or unexpected input.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the symbol is empty, too long, or contains
    /// characters outside `A-Z 0-9 & - _ .`.
    pub fn new(raw: &str) -> Result<Self, DalalError> {
        let s = raw.trim().to_ascii_uppercase();
        if s.is_empty() {
            return Err(DalalError::InvalidArg("symbol must not be empty".into()));
        }
        if s.len() > Self::MAX_LEN {
            return Err(DalalError::InvalidArg(format!("symbol too long: {s}")));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '&' | '-' | '_' | '.'))
        {
            return Err(DalalError::InvalidArg(format!("invalid symbol: {s}")));
        }
        Ok(Self(s))
    }

    /// The normalized ticker.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Yahoo Finance ticker for the NSE listing.
    #[must_use]
    pub fn yahoo_ticker(&self) -> String {
        format!("{}.NS", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusive calendar-date window with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

/// One upstream row mapped into canonical field names but not yet validated.
///
/// Every adapter converts its own typed upstream record into this shape; any
/// field the upstream omitted or failed to parse stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBar {
    /// Trading date.
    pub date: Option<NaiveDate>,
    /// Opening price.
    pub open: Option<Decimal>,
    /// Session high.
    pub high: Option<Decimal>,
    /// Session low.
    pub low: Option<Decimal>,
    /// Closing price.
    pub close: Option<Decimal>,
    /// Traded quantity.
    pub volume: Option<u64>,
}

impl RawBar {
    /// True when open, high, low and close are all present.
    #[must_use]
    pub const fn has_prices(&self) -> bool {
        self.open.is_some() && self.high.is_some() && self.low.is_some() && self.close.is_some()
    }
}

/// Rows returned by one connector, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSeries {
    /// Connector that produced the rows.
    pub connector: &'static str,
    /// Raw rows.
    pub bars: Vec<RawBar>,
}

impl RawSeries {
    /// Wrap rows produced by `connector`.
    #[must_use]
    pub const fn new(connector: &'static str, bars: Vec<RawBar>) -> Self {
        Self { connector, bars }
    }

    /// A series is usable when at least one row carries all four prices.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.bars.iter().any(RawBar::has_prices)
    }
}

/// Canonical daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date.
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Opening price.
    #[serde(rename = "Open", with = "rust_decimal::serde::float")]
    pub open: Decimal,
    /// Session high.
    #[serde(rename = "High", with = "rust_decimal::serde::float")]
    pub high: Decimal,
    /// Session low.
    #[serde(rename = "Low", with = "rust_decimal::serde::float")]
    pub low: Decimal,
    /// Closing price.
    #[serde(rename = "Close", with = "rust_decimal::serde::float")]
    pub close: Decimal,
    /// Traded quantity; zero when the source did not report it.
    #[serde(rename = "Volume")]
    pub volume: u64,
}

impl PriceBar {
    /// Close as `f64` for indicator math.
    #[must_use]
    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or(f64::NAN)
    }
    /// High as `f64` for indicator math.
    #[must_use]
    pub fn high_f64(&self) -> f64 {
        self.high.to_f64().unwrap_or(f64::NAN)
    }
    /// Low as `f64` for indicator math.
    #[must_use]
    pub fn low_f64(&self) -> f64 {
        self.low.to_f64().unwrap_or(f64::NAN)
    }
}

/// Ordered bars for one symbol over the effective request window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSeries {
    /// Symbol the bars belong to.
    pub symbol: Symbol,
    /// Bars sorted ascending by date.
    pub bars: Vec<PriceBar>,
    /// Connector that supplied the bars.
    pub connector: &'static str,
}

impl PriceSeries {
    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// True when the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Derived indicator values for one bar. `None` marks the warm-up period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Bollinger middle band (rolling mean of close).
    #[serde(rename = "BB_Mid")]
    pub bb_mid: Option<f64>,
    /// Rolling sample standard deviation of close.
    #[serde(rename = "BB_Std")]
    pub bb_std: Option<f64>,
    /// Bollinger upper band.
    #[serde(rename = "BB_Upper")]
    pub bb_upper: Option<f64>,
    /// Bollinger lower band.
    #[serde(rename = "BB_Lower")]
    pub bb_lower: Option<f64>,
    /// True range.
    #[serde(rename = "TR")]
    pub true_range: Option<f64>,
    /// Average true range.
    #[serde(rename = "ATR")]
    pub atr: Option<f64>,
    /// Fast EMA of close.
    #[serde(rename = "EMA12")]
    pub ema_fast: Option<f64>,
    /// Slow EMA of close.
    #[serde(rename = "EMA26")]
    pub ema_slow: Option<f64>,
    /// MACD line.
    #[serde(rename = "MACD")]
    pub macd: Option<f64>,
    /// MACD signal line.
    #[serde(rename = "Signal")]
    pub macd_signal: Option<f64>,
    /// MACD histogram.
    #[serde(rename = "Histogram")]
    pub macd_histogram: Option<f64>,
    /// Relative strength index.
    #[serde(rename = "RSI")]
    pub rsi: Option<f64>,
}

/// A price bar flattened together with its indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    /// The underlying bar.
    #[serde(flatten)]
    pub bar: PriceBar,
    /// Indicators computed at this bar.
    #[serde(flatten)]
    pub indicators: IndicatorSet,
}

/// Best-effort company metadata. Absent fields are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_business_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<u64>,
    #[serde(rename = "trailingPE", skip_serializing_if = "Option::is_none")]
    pub trailing_pe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_eps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_volume: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
}

impl SymbolInfo {
    /// True when no field is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Payload of the price-history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockData {
    /// Annotated bars, ascending by date.
    pub history: Vec<AnnotatedBar>,
    /// Metadata from the winning connector; may be empty.
    pub info: SymbolInfo,
}

/// Latest close, or `"N/A"` when it could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestPrice {
    /// Last close reported by the quote provider.
    Price(Decimal),
    /// Lookup failed or returned nothing.
    NotAvailable,
}

impl LatestPrice {
    /// Literal used for unavailable prices.
    pub const NOT_AVAILABLE: &'static str = "N/A";
}

impl From<Result<Decimal, DalalError>> for LatestPrice {
    fn from(r: Result<Decimal, DalalError>) -> Self {
        r.map_or(Self::NotAvailable, Self::Price)
    }
}

impl Serialize for LatestPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Price(p) => match p.to_f64() {
                Some(v) => serializer.serialize_f64(v),
                None => serializer.serialize_str(Self::NOT_AVAILABLE),
            },
            Self::NotAvailable => serializer.serialize_str(Self::NOT_AVAILABLE),
        }
    }
}

/// Peer symbol with its latest price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarStock {
    /// Peer ticker.
    pub symbol: String,
    /// Latest close.
    pub price: LatestPrice,
}

/// Payload of the similar-stocks endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimilarStocks {
    /// Sector of the requested symbol, empty when unknown.
    pub sector: String,
    /// Sampled peers.
    pub similar: Vec<SimilarStock>,
    /// Diagnostic message when the lookup degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Headline text.
    pub title: String,
    /// Article URL.
    pub link: String,
    /// Publication date as displayed by the publisher.
    pub date: String,
}

/// Payload of the news endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewsFeed {
    /// Headlines, newest first as published.
    pub news: Vec<NewsItem>,
    /// Diagnostic message when the lookup degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload of the symbols endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolList {
    /// Sorted, de-duplicated tickers.
    pub symbols: Vec<String>,
}
