use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use dalal_core::{NewsFeed, SimilarStocks, StockData, SymbolList};
use dalal_types::CacheConfig;
use moka::future::Cache;

/// Minimal async key/value store with expiry semantics owned by the implementor.
#[async_trait]
pub trait CacheStore<K, V>: Send + Sync {
    /// Live value for `key`, if any. Expired entries read as absent.
    async fn get(&self, key: &K) -> Option<V>;
    /// Store `value`, replacing any previous entry and restarting its TTL.
    async fn insert(&self, key: K, value: V);
}

/// Concurrent cache whose entries expire a fixed time after insertion.
///
/// Backed by `moka::future::Cache`, so unrelated keys never contend on a single
/// lock. A zero TTL disables the store: every lookup misses and inserts are
/// dropped. Without `max_entries` nothing is evicted except by expiry.
pub struct TtlCache<K, V> {
    inner: Option<Cache<K, V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Build a store from cache settings.
    #[must_use]
    pub fn new(cfg: &CacheConfig) -> Self {
        let Some(ttl) = cfg.ttl() else {
            return Self::disabled();
        };
        let mut builder = Cache::builder().time_to_live(ttl);
        if let Some(max) = cfg.max_entries {
            builder = builder.max_capacity(max);
        }
        Self {
            inner: Some(builder.build()),
        }
    }

    /// A store that never retains anything.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { inner: None }
    }

    /// Whether entries are retained at all.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Approximate number of live entries after flushing pending maintenance.
    pub async fn len(&self) -> u64 {
        match &self.inner {
            Some(c) => {
                c.run_pending_tasks().await;
                c.entry_count()
            }
            None => 0,
        }
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        if let Some(c) = &self.inner {
            c.invalidate_all();
            c.run_pending_tasks().await;
        }
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        match &self.inner {
            Some(c) => c.get(key).await,
            None => None,
        }
    }

    async fn insert(&self, key: K, value: V) {
        if let Some(c) = &self.inner {
            c.insert(key, value).await;
        }
    }
}

/// One typed cache per payload served by the orchestrator.
pub struct Stores {
    /// Annotated price history plus info, keyed by [`keys::stock`].
    pub stock: TtlCache<String, Arc<StockData>>,
    /// Exchange symbol list, keyed by [`keys::SYMBOLS`].
    pub symbols: TtlCache<String, Arc<SymbolList>>,
    /// Similar-stock payloads, keyed by [`keys::similar`].
    pub similar: TtlCache<String, Arc<SimilarStocks>>,
    /// Headline payloads, keyed by [`keys::news`].
    pub news: TtlCache<String, Arc<NewsFeed>>,
}

impl Stores {
    /// Build every store from the same settings.
    #[must_use]
    pub fn new(cfg: &CacheConfig) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(ttl_ms = cfg.ttl_ms, max_entries = ?cfg.max_entries, "building result caches");
        Self {
            stock: TtlCache::new(cfg),
            symbols: TtlCache::new(cfg),
            similar: TtlCache::new(cfg),
            news: TtlCache::new(cfg),
        }
    }
}

/// Deterministic cache keys.
pub mod keys {
    use dalal_core::{DateWindow, Symbol};

    /// Key of the exchange symbol list.
    pub const SYMBOLS: &str = "nse_symbols";

    /// `stock_{SYMBOL}_{start}_{end}` over the normalized window.
    #[must_use]
    pub fn stock(symbol: &Symbol, window: &DateWindow) -> String {
        format!("stock_{symbol}_{}", window.cache_fragment())
    }

    /// `similar_{SYMBOL}`.
    #[must_use]
    pub fn similar(symbol: &Symbol) -> String {
        format!("similar_{symbol}")
    }

    /// `news_{SYMBOL}`.
    #[must_use]
    pub fn news(symbol: &Symbol) -> String {
        format!("news_{symbol}")
    }
}
