use std::collections::BTreeSet;
use std::sync::Arc;

use dalal_core::{Capability, DalalError, SymbolList};
use dalal_middleware::{CacheStore, keys};

use crate::Dalal;

/// Longest ticker kept in the public symbol list, exclusive.
const MAX_LISTED_LEN: usize = 15;

/// Trim, de-duplicate and sort a raw exchange listing, keeping tickers shorter
/// than 15 characters.
#[must_use]
pub fn filter_symbols<I, S>(raw: I) -> SymbolList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let symbols: BTreeSet<String> = raw
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty() && s.chars().count() < MAX_LISTED_LEN)
        .collect();
    SymbolList {
        symbols: symbols.into_iter().collect(),
    }
}

impl Dalal {
    /// Exchange symbol list: unique tickers shorter than 15 characters, sorted.
    ///
    /// Served from cache when fresh; otherwise fetched from the first connector
    /// with a symbol-list capability that answers.
    ///
    /// # Errors
    /// Returns `Unsupported` when no connector lists symbols, otherwise the
    /// collapsed upstream failure.
    #[cfg_attr(feature = "tracing", tracing::instrument(target = "dalal::router", skip(self)))]
    pub async fn symbols(&self) -> Result<Arc<SymbolList>, DalalError> {
        let key = keys::SYMBOLS.to_string();
        if let Some(hit) = self.stores.symbols.get(&key).await {
            return Ok(hit);
        }

        let raw = self
            .fetch_single(Capability::Symbols, "symbol list".to_string(), |c| {
                c.as_symbol_list_provider()?;
                Some(async move {
                    match c.as_symbol_list_provider() {
                        Some(p) => p.symbols().await,
                        None => Err(DalalError::unsupported(Capability::Symbols.as_str())),
                    }
                })
            })
            .await?;

        let list = Arc::new(filter_symbols(raw));
        #[cfg(feature = "tracing")]
        tracing::debug!(count = list.symbols.len(), "symbol list refreshed");
        self.stores.symbols.insert(key, Arc::clone(&list)).await;
        Ok(list)
    }
}
