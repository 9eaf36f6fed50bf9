use std::sync::Arc;

use dalal_core::{NewsFeed, Symbol};
use dalal_middleware::{CacheStore, keys};

use crate::Dalal;

impl Dalal {
    /// Recent headlines for `symbol`, at most `news_limit` of them.
    ///
    /// Never fails: an upstream error degrades to an empty feed carrying the
    /// message in `error`. Only successful feeds are cached, including empty ones.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "dalal::router", skip(self), fields(symbol = %symbol))
    )]
    pub async fn news(&self, symbol: &Symbol) -> Arc<NewsFeed> {
        let key = keys::news(symbol);
        if let Some(hit) = self.stores.news.get(&key).await {
            return hit;
        }
        match self.headlines(symbol, self.cfg.news_limit).await {
            Ok(news) => {
                let feed = Arc::new(NewsFeed { news, error: None });
                self.stores.news.insert(key, Arc::clone(&feed)).await;
                feed
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "news degraded");
                Arc::new(NewsFeed {
                    news: Vec::new(),
                    error: Some(e.to_string()),
                })
            }
        }
    }
}
