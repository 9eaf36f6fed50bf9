use std::collections::BTreeMap;

use dalal_core::{LatestPrice, Symbol};

use crate::Dalal;

impl Dalal {
    /// Latest close for many symbols at once.
    ///
    /// Behavior:
    /// - Each entry is trimmed and upper-cased; blank entries are skipped and
    ///   duplicates collapse into one key.
    /// - Lookups run concurrently. A symbol that is invalid or whose lookup
    ///   fails maps to `LatestPrice::NotAvailable`; nothing aborts the batch.
    /// - Results are not cached.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "dalal::router", skip(self, symbols), fields(count = symbols.len()))
    )]
    pub async fn batch_prices<S: AsRef<str>>(&self, symbols: &[S]) -> BTreeMap<String, LatestPrice> {
        let mut wanted: Vec<String> = symbols
            .iter()
            .map(|s| s.as_ref().trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        wanted.sort_unstable();
        wanted.dedup();

        let tasks = wanted.into_iter().map(|raw| async move {
            let price = match Symbol::new(&raw) {
                Ok(sym) => LatestPrice::from(self.latest_close(&sym).await),
                Err(_) => LatestPrice::NotAvailable,
            };
            (raw, price)
        });

        futures::future::join_all(tasks).await.into_iter().collect()
    }
}
