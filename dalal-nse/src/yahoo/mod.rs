mod chart;
mod download;
mod summary;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use dalal_core::connector::{
    ConnectorKey, DalalConnector, HistorySource, InfoProvider, QuoteProvider,
};
use dalal_core::{
    Capability, DalalError, DateWindow, RawSeries, SourceOutcome, Symbol, SymbolInfo,
};
use rust_decimal::Decimal;
use tokio::sync::OnceCell;

use crate::error::AdapterError;
use crate::http::{DEFAULT_TIMEOUT, build_client, send_checked, trim_base};

const QUERY1: &str = "https://query1.finance.yahoo.com";
const QUERY2: &str = "https://query2.finance.yahoo.com";

/// Which slice of the chart endpoint to request.
enum ChartSpan {
    /// `[start, end + 1 day)` in UTC midnights.
    Window(DateWindow),
    /// A named trailing range such as `1y` or `5d`.
    Range(&'static str),
}

fn midnight_utc(d: NaiveDate) -> i64 {
    d.and_hms_opt(0, 0, 0)
        .map_or(0, |dt| dt.and_utc().timestamp())
}

/// Shared Yahoo Finance HTTP client.
///
/// Holds the cookie-aware `reqwest` client, the two API hosts and a lazily
/// fetched crumb for the endpoints that require one.
pub struct YahooClient {
    http: reqwest::Client,
    query1: String,
    query2: String,
    crumb: OnceCell<Option<String>>,
}

impl YahooClient {
    /// Client against the public Yahoo hosts.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new() -> Result<Self, DalalError> {
        Self::with_base_urls(QUERY1, QUERY2, DEFAULT_TIMEOUT)
    }

    /// Client against custom hosts, e.g. a local mock server for both.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn with_base_urls(
        query1: impl Into<String>,
        query2: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DalalError> {
        Ok(Self {
            http: build_client(timeout)?,
            query1: trim_base(query1),
            query2: trim_base(query2),
            crumb: OnceCell::new(),
        })
    }

    async fn crumb(&self) -> Option<&str> {
        self.crumb
            .get_or_init(|| async {
                let req = self.http.get(format!("{}/v1/test/getcrumb", self.query2));
                let text = send_checked(req).await.ok()?.text().await.ok()?;
                let text = text.trim();
                (!text.is_empty() && !text.contains('<')).then(|| text.to_string())
            })
            .await
            .as_deref()
    }

    async fn chart(&self, ticker: &str, span: ChartSpan) -> Result<chart::ChartResult, AdapterError> {
        let url = format!("{}/v8/finance/chart/{ticker}", self.query1);
        let mut req = self
            .http
            .get(url)
            .query(&[("interval", "1d"), ("events", "history"), ("includeAdjustedClose", "true")]);
        req = match span {
            ChartSpan::Window(w) => req.query(&[
                ("period1", midnight_utc(w.start()).to_string()),
                ("period2", midnight_utc(w.end_exclusive()).to_string()),
            ]),
            ChartSpan::Range(r) => req.query(&[("range", r)]),
        };
        let body = send_checked(req).await?.text().await?;
        chart::parse(&body)
    }

    async fn download(&self, ticker: &str, window: DateWindow) -> Result<Vec<dalal_core::RawBar>, AdapterError> {
        let url = format!("{}/v7/finance/download/{ticker}", self.query1);
        let mut req = self.http.get(url).query(&[
            ("period1", midnight_utc(window.start()).to_string()),
            ("period2", midnight_utc(window.end_exclusive()).to_string()),
            ("interval", "1d".to_string()),
            ("events", "history".to_string()),
            ("includeAdjustedClose", "true".to_string()),
        ]);
        if let Some(c) = self.crumb().await {
            req = req.query(&[("crumb", c)]);
        }
        let body = send_checked(req).await?.text().await?;
        download::parse(&body)
    }

    async fn summary(&self, ticker: &str) -> Result<SymbolInfo, AdapterError> {
        let url = format!("{}/v10/finance/quoteSummary/{ticker}", self.query2);
        let mut req = self.http.get(url).query(&[("modules", summary::MODULES)]);
        if let Some(c) = self.crumb().await {
            req = req.query(&[("crumb", c)]);
        }
        let body = send_checked(req).await?.text().await?;
        summary::parse(&body)
    }
}

fn history_outcome(
    connector: &'static str,
    r: Result<Vec<dalal_core::RawBar>, AdapterError>,
) -> SourceOutcome {
    match r {
        Ok(bars) => SourceOutcome::from_series(RawSeries::new(connector, bars)),
        Err(AdapterError::NotFound(_)) => SourceOutcome::Empty,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(connector, error = %e, "history request failed");
            SourceOutcome::Failed(e.into_dalal(connector, Capability::History))
        }
    }
}

/// Primary Yahoo connector: chart history over the requested window, company
/// metadata via `quoteSummary`, and the latest close.
pub struct YahooChartConnector {
    client: Arc<YahooClient>,
}

impl YahooChartConnector {
    /// Static connector key.
    pub const KEY: ConnectorKey = ConnectorKey::new("yahoo-chart");

    /// Connector sharing `client` with the other Yahoo connectors.
    #[must_use]
    pub const fn new(client: Arc<YahooClient>) -> Self {
        Self { client }
    }
}

impl DalalConnector for YahooChartConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }
    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
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
}

#[async_trait]
impl HistorySource for YahooChartConnector {
    async fn fetch(&self, symbol: &Symbol, window: DateWindow) -> SourceOutcome {
        let r = self
            .client
            .chart(&symbol.yahoo_ticker(), ChartSpan::Window(window))
            .await
            .map(chart::ChartResult::into_bars);
        history_outcome(self.name(), r)
    }
}

#[async_trait]
impl InfoProvider for YahooChartConnector {
    async fn info(&self, symbol: &Symbol) -> Result<SymbolInfo, DalalError> {
        self.client
            .summary(&symbol.yahoo_ticker())
            .await
            .map_err(|e| e.into_dalal(self.name(), Capability::Info))
    }
}

#[async_trait]
impl QuoteProvider for YahooChartConnector {
    async fn latest_close(&self, symbol: &Symbol) -> Result<Decimal, DalalError> {
        let ticker = symbol.yahoo_ticker();
        let res = self
            .client
            .chart(&ticker, ChartSpan::Range("5d"))
            .await
            .map_err(|e| e.into_dalal(self.name(), Capability::Quote))?;
        res.latest_close()
            .ok_or_else(|| DalalError::data_unavailable(format!("latest close for {symbol}")))
    }
}

/// Yahoo CSV bulk-download history.
pub struct YahooDownloadConnector {
    client: Arc<YahooClient>,
}

impl YahooDownloadConnector {
    /// Static connector key.
    pub const KEY: ConnectorKey = ConnectorKey::new("yahoo-download");

    /// Connector sharing `client` with the other Yahoo connectors.
    #[must_use]
    pub const fn new(client: Arc<YahooClient>) -> Self {
        Self { client }
    }
}

impl DalalConnector for YahooDownloadConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }
    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }
    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        Some(self as &dyn HistorySource)
    }
    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        Some(self as &dyn InfoProvider)
    }
}

#[async_trait]
impl HistorySource for YahooDownloadConnector {
    async fn fetch(&self, symbol: &Symbol, window: DateWindow) -> SourceOutcome {
        let r = self.client.download(&symbol.yahoo_ticker(), window).await;
        history_outcome(self.name(), r)
    }
}

#[async_trait]
impl InfoProvider for YahooDownloadConnector {
    async fn info(&self, symbol: &Symbol) -> Result<SymbolInfo, DalalError> {
        self.client
            .summary(&symbol.yahoo_ticker())
            .await
            .map_err(|e| e.into_dalal(self.name(), Capability::Info))
    }
}

/// Yahoo chart history over the trailing year, regardless of the requested window.
pub struct YahooTrailingConnector {
    client: Arc<YahooClient>,
    range: &'static str,
}

impl YahooTrailingConnector {
    /// Static connector key.
    pub const KEY: ConnectorKey = ConnectorKey::new("yahoo-trailing");

    /// One-year trailing connector.
    #[must_use]
    pub const fn new(client: Arc<YahooClient>) -> Self {
        Self { client, range: "1y" }
    }

    /// Use a different named Yahoo range (`6mo`, `2y`, ...).
    #[must_use]
    pub const fn with_range(mut self, range: &'static str) -> Self {
        self.range = range;
        self
    }
}

impl DalalConnector for YahooTrailingConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }
    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }
    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        Some(self as &dyn HistorySource)
    }
    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        Some(self as &dyn InfoProvider)
    }
}

#[async_trait]
impl HistorySource for YahooTrailingConnector {
    async fn fetch(&self, symbol: &Symbol, _window: DateWindow) -> SourceOutcome {
        let r = self
            .client
            .chart(&symbol.yahoo_ticker(), ChartSpan::Range(self.range))
            .await
            .map(chart::ChartResult::into_bars);
        history_outcome(self.name(), r)
    }
}

#[async_trait]
impl InfoProvider for YahooTrailingConnector {
    async fn info(&self, symbol: &Symbol) -> Result<SymbolInfo, DalalError> {
        self.client
            .summary(&symbol.yahoo_ticker())
            .await
            .map_err(|e| e.into_dalal(self.name(), Capability::Info))
    }
}
