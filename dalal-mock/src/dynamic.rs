use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use dalal_core::connector::{
    DalalConnector, HistorySource, InfoProvider, NewsProvider, QuoteProvider, SymbolListProvider,
};
use dalal_core::{
    Capability, DalalError, DateWindow, NewsItem, RawBar, RawSeries, SourceOutcome, Symbol,
    SymbolInfo,
};
use rust_decimal::Decimal;

/// Instruction for how a method should behave for a given input.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after a delay.
    Delay(Duration, T),
    /// Fail immediately with the provided error.
    Fail(DalalError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T: Clone> MockBehavior<T> {
    async fn run(&self) -> Result<T, DalalError> {
        match self {
            Self::Return(v) => Ok(v.clone()),
            Self::Delay(d, v) => {
                tokio::time::sleep(*d).await;
                Ok(v.clone())
            }
            Self::Fail(e) => Err(e.clone()),
            Self::Hang => std::future::pending().await,
        }
    }
}

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<String, MockBehavior<Vec<RawBar>>>,
    default_history: Option<MockBehavior<Vec<RawBar>>>,
    info_rules: HashMap<String, MockBehavior<SymbolInfo>>,
    quote_rules: HashMap<String, MockBehavior<Decimal>>,
    news_rules: HashMap<String, MockBehavior<Vec<NewsItem>>>,
    symbols: Option<MockBehavior<Vec<String>>>,
    history_windows: Vec<DateWindow>,
}

#[derive(Default)]
struct Counters {
    history: AtomicUsize,
    info: AtomicUsize,
    quote: AtomicUsize,
    symbols: AtomicUsize,
    news: AtomicUsize,
}

/// Connector whose behavior is scripted per symbol at runtime.
///
/// Unscripted history calls return `Empty`; other unscripted capabilities fail
/// with `DataUnavailable`.
pub struct DynamicMockConnector {
    name: &'static str,
    capabilities: Vec<Capability>,
    state: Mutex<InternalState>,
    calls: Counters,
}

const ALL: &[Capability] = &[
    Capability::History,
    Capability::Info,
    Capability::Quote,
    Capability::Symbols,
    Capability::News,
];

impl DynamicMockConnector {
    /// Connector advertising every capability.
    #[must_use]
    pub fn new_with_name(name: &'static str) -> Arc<Self> {
        Self::new_with_capabilities(name, ALL)
    }

    /// Connector advertising only `capabilities`.
    #[must_use]
    pub fn new_with_capabilities(name: &'static str, capabilities: &[Capability]) -> Arc<Self> {
        Arc::new(Self {
            name,
            capabilities: capabilities.to_vec(),
            state: Mutex::new(InternalState::default()),
            calls: Counters::default(),
        })
    }

    fn has(&self, cap: Capability) -> bool {
        self.capabilities.contains(&cap)
    }

    /// Script history for one symbol.
    pub async fn set_history_behavior(&self, symbol: &str, behavior: MockBehavior<Vec<RawBar>>) {
        self.state
            .lock()
            .await
            .history_rules
            .insert(symbol.to_string(), behavior);
    }

    /// Script history for every symbol without its own rule.
    pub async fn set_default_history(&self, behavior: MockBehavior<Vec<RawBar>>) {
        self.state.lock().await.default_history = Some(behavior);
    }

    /// Script metadata for one symbol.
    pub async fn set_info_behavior(&self, symbol: &str, behavior: MockBehavior<SymbolInfo>) {
        self.state
            .lock()
            .await
            .info_rules
            .insert(symbol.to_string(), behavior);
    }

    /// Script the latest close for one symbol.
    pub async fn set_quote_behavior(&self, symbol: &str, behavior: MockBehavior<Decimal>) {
        self.state
            .lock()
            .await
            .quote_rules
            .insert(symbol.to_string(), behavior);
    }

    /// Script headlines for one symbol.
    pub async fn set_news_behavior(&self, symbol: &str, behavior: MockBehavior<Vec<NewsItem>>) {
        self.state
            .lock()
            .await
            .news_rules
            .insert(symbol.to_string(), behavior);
    }

    /// Script the symbol list.
    pub async fn set_symbols_behavior(&self, behavior: MockBehavior<Vec<String>>) {
        self.state.lock().await.symbols = Some(behavior);
    }

    /// Windows passed to every history call, in call order.
    pub async fn history_windows(&self) -> Vec<DateWindow> {
        self.state.lock().await.history_windows.clone()
    }

    /// Number of history calls so far.
    pub fn history_calls(&self) -> usize {
        self.calls.history.load(Ordering::SeqCst)
    }
    /// Number of info calls so far.
    pub fn info_calls(&self) -> usize {
        self.calls.info.load(Ordering::SeqCst)
    }
    /// Number of latest-close calls so far.
    pub fn quote_calls(&self) -> usize {
        self.calls.quote.load(Ordering::SeqCst)
    }
    /// Number of symbol-list calls so far.
    pub fn symbols_calls(&self) -> usize {
        self.calls.symbols.load(Ordering::SeqCst)
    }
    /// Number of news calls so far.
    pub fn news_calls(&self) -> usize {
        self.calls.news.load(Ordering::SeqCst)
    }

    fn missing(&self, what: &str, symbol: &str) -> DalalError {
        DalalError::data_unavailable(format!("{what} for {symbol} from {}", self.name))
    }
}

impl DalalConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }
    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        self.has(Capability::History)
            .then_some(self as &dyn HistorySource)
    }
    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        self.has(Capability::Info).then_some(self as &dyn InfoProvider)
    }
    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        self.has(Capability::Quote).then_some(self as &dyn QuoteProvider)
    }
    fn as_symbol_list_provider(&self) -> Option<&dyn SymbolListProvider> {
        self.has(Capability::Symbols)
            .then_some(self as &dyn SymbolListProvider)
    }
    fn as_news_provider(&self) -> Option<&dyn NewsProvider> {
        self.has(Capability::News).then_some(self as &dyn NewsProvider)
    }
}

#[async_trait]
impl HistorySource for DynamicMockConnector {
    async fn fetch(&self, symbol: &Symbol, window: DateWindow) -> SourceOutcome {
        self.calls.history.fetch_add(1, Ordering::SeqCst);
        let rule = {
            let mut st = self.state.lock().await;
            st.history_windows.push(window);
            st.history_rules
                .get(symbol.as_str())
                .or(st.default_history.as_ref())
                .cloned()
        };
        match rule {
            Some(b) => match b.run().await {
                Ok(bars) => SourceOutcome::from_series(RawSeries::new(self.name, bars)),
                Err(e) => SourceOutcome::Failed(e),
            },
            None => SourceOutcome::Empty,
        }
    }
}

#[async_trait]
impl InfoProvider for DynamicMockConnector {
    async fn info(&self, symbol: &Symbol) -> Result<SymbolInfo, DalalError> {
        self.calls.info.fetch_add(1, Ordering::SeqCst);
        let rule = self.state.lock().await.info_rules.get(symbol.as_str()).cloned();
        match rule {
            Some(b) => b.run().await,
            None => Err(self.missing("info", symbol.as_str())),
        }
    }
}

#[async_trait]
impl QuoteProvider for DynamicMockConnector {
    async fn latest_close(&self, symbol: &Symbol) -> Result<Decimal, DalalError> {
        self.calls.quote.fetch_add(1, Ordering::SeqCst);
        let rule = self.state.lock().await.quote_rules.get(symbol.as_str()).cloned();
        match rule {
            Some(b) => b.run().await,
            None => Err(self.missing("latest close", symbol.as_str())),
        }
    }
}

#[async_trait]
impl SymbolListProvider for DynamicMockConnector {
    async fn symbols(&self) -> Result<Vec<String>, DalalError> {
        self.calls.symbols.fetch_add(1, Ordering::SeqCst);
        let rule = self.state.lock().await.symbols.clone();
        match rule {
            Some(b) => b.run().await,
            None => Err(self.missing("symbol list", "exchange")),
        }
    }
}

#[async_trait]
impl NewsProvider for DynamicMockConnector {
    async fn news(&self, symbol: &Symbol, limit: usize) -> Result<Vec<NewsItem>, DalalError> {
        self.calls.news.fetch_add(1, Ordering::SeqCst);
        let rule = self.state.lock().await.news_rules.get(symbol.as_str()).cloned();
        match rule {
            Some(b) => b.run().await.map(|mut v| {
                v.truncate(limit);
                v
            }),
            None => Err(self.missing("news", symbol.as_str())),
        }
    }
}
