//! Configuration types shared by the orchestrator, the cache and the server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Strategy for walking the history fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Try each step in priority order; the next step starts only after the
    /// previous one finished without a usable series.
    #[default]
    PriorityWithFallback,
    /// Start every step concurrently. A usable series is returned once all
    /// higher-priority steps have finished unusable, so priority still breaks ties.
    Latency,
}

/// How a fallback step reshapes the requested window before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAdjust {
    /// Use the normalized window unchanged.
    #[default]
    AsRequested,
    /// Move the start date `days` earlier; the end date is unchanged.
    WidenStart {
        /// Number of calendar days to widen by.
        days: u32,
    },
}

/// Time-to-live cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime in milliseconds. Zero disables caching.
    pub ttl_ms: u64,
    /// Optional bound on live entries. `None` keeps every distinct key until it
    /// expires, so memory grows with the number of distinct requests.
    pub max_entries: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 3_600_000,
            max_entries: None,
        }
    }
}

impl CacheConfig {
    /// Return the configured TTL, or `None` when caching is disabled.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        if self.ttl_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.ttl_ms))
        }
    }
}

/// Window lengths and multipliers for the technical indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Bollinger rolling window.
    pub bollinger_window: usize,
    /// Bollinger band width in standard deviations.
    pub bollinger_k: f64,
    /// Average True Range rolling window.
    pub atr_window: usize,
    /// MACD fast EMA span.
    pub macd_fast: usize,
    /// MACD slow EMA span.
    pub macd_slow: usize,
    /// MACD signal EMA span.
    pub macd_signal: usize,
    /// RSI rolling window.
    pub rsi_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            bollinger_window: 20,
            bollinger_k: 2.0,
            atr_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_window: 14,
        }
    }
}

/// Global configuration for the `Dalal` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DalalConfig {
    /// Strategy for walking the history fallback chain.
    pub fetch_strategy: FetchStrategy,
    /// Timeout applied to every individual connector call.
    pub provider_timeout: Duration,
    /// Optional deadline for the whole fallback chain. Without it the worst case
    /// latency is the sum of every step's timeout.
    pub request_timeout: Option<Duration>,
    /// Result cache settings.
    pub cache: CacheConfig,
    /// Indicator parameters.
    pub indicators: IndicatorConfig,
    /// How many peer symbols the similar-stocks endpoint samples.
    pub similar_sample_size: usize,
    /// Maximum number of headlines returned by the news endpoint.
    pub news_limit: usize,
}

impl Default for DalalConfig {
    fn default() -> Self {
        Self {
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(15),
            request_timeout: None,
            cache: CacheConfig::default(),
            indicators: IndicatorConfig::default(),
            similar_sample_size: 5,
            news_limit: 5,
        }
    }
}
