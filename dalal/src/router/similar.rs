use std::sync::Arc;

use dalal_core::{DalalError, LatestPrice, SimilarStock, SimilarStocks, Symbol};
use dalal_middleware::{CacheStore, keys};
use rand::seq::IndexedRandom;

use crate::Dalal;

impl Dalal {
    /// Sector of `symbol` plus a random sample of other listed symbols with
    /// their latest close.
    ///
    /// Never fails: any error degrades to an empty payload whose `error` field
    /// carries the message. Only successful payloads are cached.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "dalal::router", skip(self), fields(symbol = %symbol))
    )]
    pub async fn similar_stocks(&self, symbol: &Symbol) -> Arc<SimilarStocks> {
        let key = keys::similar(symbol);
        if let Some(hit) = self.stores.similar.get(&key).await {
            return hit;
        }
        match self.collect_similar(symbol).await {
            Ok(payload) => {
                let payload = Arc::new(payload);
                self.stores.similar.insert(key, Arc::clone(&payload)).await;
                payload
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "similar stocks degraded");
                Arc::new(SimilarStocks {
                    error: Some(e.to_string()),
                    ..SimilarStocks::default()
                })
            }
        }
    }

    async fn collect_similar(&self, symbol: &Symbol) -> Result<SimilarStocks, DalalError> {
        let sector = self.info(symbol).await?.sector.unwrap_or_default();
        let listing = self.symbols().await?;

        let picked: Vec<String> = {
            let candidates: Vec<&String> = listing
                .symbols
                .iter()
                .filter(|s| s.as_str() != symbol.as_str())
                .collect();
            candidates
                .choose_multiple(&mut rand::rng(), self.cfg.similar_sample_size)
                .map(|s| (*s).clone())
                .collect()
        };

        let tasks = picked.into_iter().map(|peer| async move {
            let price = match Symbol::new(&peer) {
                Ok(sym) => LatestPrice::from(self.latest_close(&sym).await),
                Err(_) => LatestPrice::NotAvailable,
            };
            SimilarStock {
                symbol: peer,
                price,
            }
        });
        let similar = futures::future::join_all(tasks).await;

        Ok(SimilarStocks {
            sector,
            similar,
            error: None,
        })
    }
}
