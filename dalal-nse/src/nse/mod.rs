mod history;
mod symbols;

use std::time::Duration;

use async_trait::async_trait;
use dalal_core::connector::{ConnectorKey, DalalConnector, HistorySource, SymbolListProvider};
use dalal_core::{Capability, DalalError, DateWindow, RawSeries, SourceOutcome, Symbol};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};

use crate::error::AdapterError;
use crate::http::{DEFAULT_TIMEOUT, build_client, send_checked, trim_base};

const WWW: &str = "https://www.nseindia.com";
const ARCHIVES: &str = "https://archives.nseindia.com";

/// NSE exchange connector: the historical-data API behind the public quote
/// page and the `EQUITY_L.csv` symbol listing.
///
/// The API only answers sessions that already hold the cookies set by the quote
/// page, so every history call visits that page first on the same client.
pub struct NseArchiveConnector {
    http: reqwest::Client,
    www: String,
    archives: String,
}

impl NseArchiveConnector {
    /// Static connector key.
    pub const KEY: ConnectorKey = ConnectorKey::new("nse-archive");

    /// Connector against the public NSE hosts.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new() -> Result<Self, DalalError> {
        Self::with_base_urls(WWW, ARCHIVES, DEFAULT_TIMEOUT)
    }

    /// Connector against custom hosts.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn with_base_urls(
        www: impl Into<String>,
        archives: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DalalError> {
        Ok(Self {
            http: build_client(timeout)?,
            www: trim_base(www),
            archives: trim_base(archives),
        })
    }

    fn quote_page(&self, symbol: &Symbol) -> String {
        format!(
            "{}/get-quotes/equity?symbol={}",
            self.www,
            symbol.as_str().replace('&', "%26")
        )
    }

    fn api_headers(&self, symbol: &Symbol) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        h.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        h.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        if let Ok(v) = HeaderValue::from_str(&self.quote_page(symbol)) {
            h.insert(REFERER, v);
        }
        h
    }

    async fn historical(
        &self,
        symbol: &Symbol,
        window: DateWindow,
    ) -> Result<Vec<dalal_core::RawBar>, AdapterError> {
        // Cookie priming; the page itself is irrelevant.
        let _ = self
            .http
            .get(format!("{}/get-quotes/equity", self.www))
            .query(&[("symbol", symbol.as_str())])
            .send()
            .await;

        let req = self
            .http
            .get(format!("{}/api/historical/cm/equity", self.www))
            .headers(self.api_headers(symbol))
            .query(&[
                ("symbol", symbol.as_str().to_string()),
                ("series", r#"["EQ"]"#.to_string()),
                ("from", history::nse_date(window.start())),
                ("to", history::nse_date(window.end())),
            ]);
        let body = send_checked(req).await?.text().await?;
        history::parse(&body)
    }

    async fn listing(&self) -> Result<Vec<String>, AdapterError> {
        let req = self
            .http
            .get(format!("{}/content/equities/EQUITY_L.csv", self.archives));
        let body = send_checked(req).await?.text().await?;
        symbols::parse(&body)
    }
}

impl DalalConnector for NseArchiveConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }
    fn vendor(&self) -> &'static str {
        "NSE India"
    }
    fn as_history_source(&self) -> Option<&dyn HistorySource> {
        Some(self as &dyn HistorySource)
    }
    fn as_symbol_list_provider(&self) -> Option<&dyn SymbolListProvider> {
        Some(self as &dyn SymbolListProvider)
    }
}

#[async_trait]
impl HistorySource for NseArchiveConnector {
    async fn fetch(&self, symbol: &Symbol, window: DateWindow) -> SourceOutcome {
        match self.historical(symbol, window).await {
            Ok(bars) => SourceOutcome::from_series(RawSeries::new(self.name(), bars)),
            Err(AdapterError::NotFound(_)) => SourceOutcome::Empty,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(connector = self.name(), %symbol, error = %e, "nse history failed");
                SourceOutcome::Failed(e.into_dalal(self.name(), Capability::History))
            }
        }
    }
}

#[async_trait]
impl SymbolListProvider for NseArchiveConnector {
    async fn symbols(&self) -> Result<Vec<String>, DalalError> {
        self.listing()
            .await
            .map_err(|e| e.into_dalal(self.name(), Capability::Symbols))
    }
}
