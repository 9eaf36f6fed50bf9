//! Dalal orchestrates NSE price-history requests across several upstream sources.
//!
//! Overview
//! - History is served through an ordered fallback chain of `(connector, WindowAdjust)`
//!   steps. The first step that yields at least one complete OHLC row wins; failures
//!   and empty answers only move the chain along.
//! - The winning series is normalized, annotated with Bollinger Bands, ATR, MACD and
//!   RSI, and cached under a key derived from the normalized window.
//! - Metadata, latest closes, the symbol list and headlines are routed to the first
//!   registered connector that offers the capability and answers successfully.
//! - The similar-stocks and news endpoints never fail: errors degrade to an empty
//!   payload carrying an `error` string, and only successful payloads are cached.
//!
//! Fetch strategy
//! - `PriorityWithFallback`: strictly sequential; a step runs only after the previous
//!   one came back unusable. Fewest upstream requests.
//! - `Latency`: every step starts at once; a usable series is returned as soon as all
//!   higher-priority steps have finished unusable, so the answer matches the
//!   sequential strategy while tail latency drops.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use dalal::{Dalal, Symbol, WindowAdjust};
//! use dalal_nse::{NseArchiveConnector, YahooChartConnector, YahooClient};
//!
//! let yahoo = Arc::new(YahooClient::new()?);
//! let nse = Arc::new(NseArchiveConnector::new()?);
//! let dalal = Dalal::builder()
//!     .history_step(Arc::new(YahooChartConnector::new(yahoo)), WindowAdjust::AsRequested)
//!     .history_step(nse.clone(), WindowAdjust::AsRequested)
//!     .history_step(nse, WindowAdjust::WidenStart { days: 30 })
//!     .build()?;
//!
//! let data = dalal.stock_data(&Symbol::new("RELIANCE")?, start, end).await?;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Dalal, DalalBuilder};
pub use router::symbols::filter_symbols;
pub use router::util::collapse_errors;

pub use dalal_core::{
    AnnotatedBar, CacheConfig, Capability, DalalConfig, DalalConnector, DalalError, DateWindow,
    FetchStrategy, IndicatorConfig, IndicatorSet, LatestPrice, NewsFeed, NewsItem, PriceBar,
    PriceSeries, SimilarStock, SimilarStocks, StockData, Symbol, SymbolInfo, SymbolList,
    WindowAdjust,
};
