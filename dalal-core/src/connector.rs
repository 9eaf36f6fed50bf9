use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::types::{DalalError, DateWindow, NewsItem, RawSeries, Symbol, SymbolInfo};
pub use dalal_types::ConnectorKey;

/// Result of asking one history source for a window.
///
/// Sources never fail the request on their own: network problems, bad status
/// codes and unparsable payloads all collapse into `Failed`, and an upstream
/// that answered with zero rows is `Empty`. Only the orchestrator decides
/// whether to fall through to the next source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    /// Rows were returned; they may still be unusable.
    Series(RawSeries),
    /// The upstream answered but had nothing for the window.
    Empty,
    /// The call failed.
    Failed(DalalError),
}

impl SourceOutcome {
    /// `Empty` for a series without rows, `Series` otherwise.
    #[must_use]
    pub fn from_series(series: RawSeries) -> Self {
        if series.bars.is_empty() {
            Self::Empty
        } else {
            Self::Series(series)
        }
    }

    /// Returns the series when it contains at least one complete row.
    #[must_use]
    pub fn into_usable(self) -> Option<RawSeries> {
        match self {
            Self::Series(s) if s.is_usable() => Some(s),
            _ => None,
        }
    }

    /// True when `into_usable` would return a series.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Series(s) if s.is_usable())
    }
}

impl From<Result<RawSeries, DalalError>> for SourceOutcome {
    fn from(r: Result<RawSeries, DalalError>) -> Self {
        match r {
            Ok(s) => Self::from_series(s),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Focused role trait for connectors that supply daily OHLCV rows.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch daily rows covering `window` (inclusive on both ends).
    async fn fetch(&self, symbol: &Symbol, window: DateWindow) -> SourceOutcome;
}

/// Focused role trait for connectors that supply company metadata.
#[async_trait]
pub trait InfoProvider: Send + Sync {
    /// Fetch metadata for the symbol. Missing fields are left unset.
    async fn info(&self, symbol: &Symbol) -> Result<SymbolInfo, DalalError>;
}

/// Focused role trait for connectors that report the latest close.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Last available closing price.
    async fn latest_close(&self, symbol: &Symbol) -> Result<Decimal, DalalError>;
}

/// Focused role trait for connectors that list tradable symbols.
#[async_trait]
pub trait SymbolListProvider: Send + Sync {
    /// Raw ticker list; ordering and duplicates are not guaranteed.
    async fn symbols(&self) -> Result<Vec<String>, DalalError>;
}

/// Focused role trait for connectors that scrape headlines.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// At most `limit` headlines for the symbol.
    async fn news(&self, symbol: &Symbol, limit: usize) -> Result<Vec<NewsItem>, DalalError>;
}

/// Main connector interface. A connector advertises each capability it
/// implements by returning a trait object from the matching `as_*` method.
pub trait DalalConnector: Send + Sync {
    /// A stable identifier used in fallback chains and logs (e.g. "yahoo-chart").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise history capability.
    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        None
    }

    /// Advertise metadata capability.
    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        None
    }

    /// Advertise latest-close capability.
    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        None
    }

    /// Advertise symbol-list capability.
    fn as_symbol_list_provider(&self) -> Option<&dyn SymbolListProvider> {
        None
    }

    /// Advertise headline capability.
    fn as_news_provider(&self) -> Option<&dyn NewsProvider> {
        None
    }
}
