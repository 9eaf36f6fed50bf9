use std::time::Duration;

use async_trait::async_trait;
use dalal_core::connector::{ConnectorKey, DalalConnector, NewsProvider};
use dalal_core::{Capability, DalalError, NewsItem, Symbol};
use scraper::{Html, Selector};

use crate::error::AdapterError;
use crate::http::{DEFAULT_TIMEOUT, build_client, send_checked, trim_base};

const BASE: &str = "https://www.moneycontrol.com";

/// Scrapes headlines from Moneycontrol's per-symbol tag page.
pub struct MoneycontrolConnector {
    http: reqwest::Client,
    base: String,
}

impl MoneycontrolConnector {
    /// Static connector key.
    pub const KEY: ConnectorKey = ConnectorKey::new("moneycontrol");

    /// Connector against the public site.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new() -> Result<Self, DalalError> {
        Self::with_base_url(BASE, DEFAULT_TIMEOUT)
    }

    /// Connector against a custom host.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn with_base_url(base: impl Into<String>, timeout: Duration) -> Result<Self, DalalError> {
        Ok(Self {
            http: build_client(timeout)?,
            base: trim_base(base),
        })
    }

    async fn page(&self, symbol: &Symbol) -> Result<String, AdapterError> {
        let url = format!(
            "{}/news/tags/{}.html",
            self.base,
            symbol.as_str().to_ascii_lowercase()
        );
        Ok(send_checked(self.http.get(url)).await?.text().await?)
    }
}

/// Extract up to `limit` headlines from a tag page.
///
/// Only the first `limit` list items are inspected; items without a linked
/// `h2` title are skipped, so fewer than `limit` headlines may come back.
pub fn parse_headlines(html: &str, limit: usize) -> Vec<NewsItem> {
    let doc = Html::parse_document(html);
    let (Ok(item_sel), Ok(title_sel), Ok(date_sel)) = (
        Selector::parse("li.clearfix"),
        Selector::parse("h2 a"),
        Selector::parse(".datetime"),
    ) else {
        return Vec::new();
    };
    let text = |el: scraper::ElementRef<'_>| {
        el.text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    };

    doc.select(&item_sel)
        .take(limit)
        .filter_map(|item| {
            let a = item.select(&title_sel).next()?;
            let link = a.value().attr("href")?.to_string();
            let date = item.select(&date_sel).next().map(text).unwrap_or_default();
            Some(NewsItem {
                title: text(a),
                link,
                date,
            })
        })
        .collect()
}

impl DalalConnector for MoneycontrolConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }
    fn vendor(&self) -> &'static str {
        "Moneycontrol"
    }
    fn as_news_provider(&self) -> Option<&dyn NewsProvider> {
        Some(self as &dyn NewsProvider)
    }
}

#[async_trait]
impl NewsProvider for MoneycontrolConnector {
    async fn news(&self, symbol: &Symbol, limit: usize) -> Result<Vec<NewsItem>, DalalError> {
        let html = self
            .page(symbol)
            .await
            .map_err(|e| e.into_dalal(self.name(), Capability::News))?;
        Ok(parse_headlines(&html, limit))
    }
}
