//! Mock connectors for dalal.
//!
//! [`MockConnector`] serves deterministic fixtures for a handful of NSE symbols.
//! [`DynamicMockConnector`] is scripted per symbol at runtime and counts calls,
//! which is what fallback and caching tests need.

use async_trait::async_trait;
use dalal_core::connector::{
    DalalConnector, HistorySource, InfoProvider, NewsProvider, QuoteProvider, SymbolListProvider,
};
use dalal_core::{
    DalalError, DateWindow, NewsItem, RawSeries, SourceOutcome, Symbol, SymbolInfo,
};
use rust_decimal::Decimal;

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockConnector, MockBehavior};

/// Fixture-backed connector. `FAIL` always errors and `TIMEOUT` stalls for 200 ms.
pub struct MockConnector {
    name: &'static str,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector registered as `dalal-mock`.
    #[must_use]
    pub const fn new() -> Self {
        Self { name: "dalal-mock" }
    }

    /// Same fixtures under a different connector name.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }

    async fn maybe_fail_or_timeout(&self, symbol: &str, capability: &str) -> Result<(), DalalError> {
        match symbol {
            "FAIL" => Err(DalalError::transient(
                self.name,
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl DalalConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }
    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        Some(self as &dyn HistorySource)
    }
    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        Some(self as &dyn InfoProvider)
    }
    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        Some(self as &dyn QuoteProvider)
    }
    fn as_symbol_list_provider(&self) -> Option<&dyn SymbolListProvider> {
        Some(self as &dyn SymbolListProvider)
    }
    fn as_news_provider(&self) -> Option<&dyn NewsProvider> {
        Some(self as &dyn NewsProvider)
    }
}

#[async_trait]
impl HistorySource for MockConnector {
    async fn fetch(&self, symbol: &Symbol, window: DateWindow) -> SourceOutcome {
        let s = symbol.as_str();
        if let Err(e) = self.maybe_fail_or_timeout(s, "history").await {
            return SourceOutcome::Failed(e);
        }
        let mut bars = fixtures::history::by_symbol(s).unwrap_or_default();
        bars.retain(|b| b.date.is_none_or(|d| window.contains(d)));
        SourceOutcome::from_series(RawSeries::new(self.name, bars))
    }
}

#[async_trait]
impl InfoProvider for MockConnector {
    async fn info(&self, symbol: &Symbol) -> Result<SymbolInfo, DalalError> {
        let s = symbol.as_str();
        self.maybe_fail_or_timeout(s, "info").await?;
        fixtures::info::by_symbol(s).ok_or_else(|| DalalError::data_unavailable(format!("info for {s}")))
    }
}

#[async_trait]
impl QuoteProvider for MockConnector {
    async fn latest_close(&self, symbol: &Symbol) -> Result<Decimal, DalalError> {
        let s = symbol.as_str();
        self.maybe_fail_or_timeout(s, "quote").await?;
        fixtures::history::by_symbol(s)
            .and_then(|bars| bars.iter().rev().find_map(|b| b.close))
            .ok_or_else(|| DalalError::data_unavailable(format!("latest close for {s}")))
    }
}

#[async_trait]
impl SymbolListProvider for MockConnector {
    async fn symbols(&self) -> Result<Vec<String>, DalalError> {
        Ok(fixtures::symbols::LISTING
            .iter()
            .map(|s| (*s).to_string())
            .collect())
    }
}

#[async_trait]
impl NewsProvider for MockConnector {
    async fn news(&self, symbol: &Symbol, limit: usize) -> Result<Vec<NewsItem>, DalalError> {
        let s = symbol.as_str();
        self.maybe_fail_or_timeout(s, "news").await?;
        let mut items = fixtures::news::by_symbol(s).unwrap_or_default();
        items.truncate(limit);
        Ok(items)
    }
}
