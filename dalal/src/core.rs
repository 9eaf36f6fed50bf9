use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use dalal_core::{
    CacheConfig, Capability, DalalConfig, DalalConnector, DalalError, FetchStrategy,
    IndicatorConfig, WindowAdjust,
};
use dalal_middleware::Stores;

/// One step of the history fallback chain.
#[derive(Clone)]
pub(crate) struct HistoryStep {
    pub(crate) connector: Arc<dyn DalalConnector>,
    pub(crate) adjust: WindowAdjust,
}

/// Orchestrator that routes requests across registered connectors.
pub struct Dalal {
    pub(crate) connectors: Vec<Arc<dyn DalalConnector>>,
    pub(crate) chain: Vec<HistoryStep>,
    pub(crate) cfg: DalalConfig,
    pub(crate) stores: Stores,
}

/// Builder for constructing a `Dalal` orchestrator with custom configuration.
pub struct DalalBuilder {
    connectors: Vec<Arc<dyn DalalConnector>>,
    chain: Vec<HistoryStep>,
    cfg: DalalConfig,
}

impl Default for DalalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DalalBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: sequential fallback, 15 s per-provider timeout, no overall
    /// deadline, one-hour cache TTL, standard indicator windows.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            chain: vec![],
            cfg: DalalConfig::default(),
        }
    }

    /// Register a connector for the collaborator capabilities (info, latest
    /// close, symbol list, news).
    ///
    /// Collaborator lookups try connectors in registration order. When no
    /// history step is added explicitly, every registered connector with a
    /// history capability becomes an `AsRequested` step in registration order.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn DalalConnector>) -> Self {
        self.register(&c);
        self
    }

    /// Append a step to the history fallback chain.
    ///
    /// The same connector may appear several times with different window
    /// adjustments. The connector is registered as well if it was not already.
    #[must_use]
    pub fn history_step(mut self, c: Arc<dyn DalalConnector>, adjust: WindowAdjust) -> Self {
        self.register(&c);
        self.chain.push(HistoryStep { connector: c, adjust });
        self
    }

    fn register(&mut self, c: &Arc<dyn DalalConnector>) {
        if !self.connectors.iter().any(|k| k.name() == c.name()) {
            self.connectors.push(Arc::clone(c));
        }
    }

    /// Select how the history chain is walked.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the timeout applied to each connector call.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Bound the whole history chain. When exceeded the request fails with
    /// `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Result cache settings. A zero TTL disables caching.
    #[must_use]
    pub const fn cache(mut self, cfg: CacheConfig) -> Self {
        self.cfg.cache = cfg;
        self
    }

    /// Indicator windows and multipliers.
    #[must_use]
    pub const fn indicators(mut self, cfg: IndicatorConfig) -> Self {
        self.cfg.indicators = cfg;
        self
    }

    /// Number of peers sampled by `similar_stocks`.
    #[must_use]
    pub const fn similar_sample_size(mut self, n: usize) -> Self {
        self.cfg.similar_sample_size = n;
        self
    }

    /// Maximum headlines returned by `news`.
    #[must_use]
    pub const fn news_limit(mut self, n: usize) -> Self {
        self.cfg.news_limit = n;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: DalalConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Dalal` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered, or if a
    /// history step names a connector without a history capability.
    pub fn build(self) -> Result<Dalal, DalalError> {
        if self.connectors.is_empty() {
            return Err(DalalError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        let chain = if self.chain.is_empty() {
            self.connectors
                .iter()
                .filter(|c| c.as_history_source().is_some())
                .map(|c| HistoryStep {
                    connector: Arc::clone(c),
                    adjust: WindowAdjust::AsRequested,
                })
                .collect()
        } else {
            self.chain
        };

        let missing: HashSet<&'static str> = chain
            .iter()
            .filter(|s| s.connector.as_history_source().is_none())
            .map(|s| s.connector.name())
            .collect();
        if !missing.is_empty() {
            let mut names: Vec<_> = missing.into_iter().collect();
            names.sort_unstable();
            return Err(DalalError::InvalidArg(format!(
                "history steps without a history capability: {}",
                names.join(", ")
            )));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            connectors = self.connectors.len(),
            steps = chain.len(),
            strategy = ?self.cfg.fetch_strategy,
            "built dalal orchestrator"
        );

        Ok(Dalal {
            stores: Stores::new(&self.cfg.cache),
            connectors: self.connectors,
            chain,
            cfg: self.cfg,
        })
    }
}

impl Dalal {
    /// Start building a new `Dalal` instance.
    #[must_use]
    pub fn builder() -> DalalBuilder {
        DalalBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DalalConfig {
        &self.cfg
    }

    /// Names of the history steps in priority order.
    #[must_use]
    pub fn chain(&self) -> Vec<(&'static str, WindowAdjust)> {
        self.chain
            .iter()
            .map(|s| (s.connector.name(), s.adjust))
            .collect()
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dalal::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability.as_str(),
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, DalalError>
    where
        Fut: core::future::Future<Output = Result<T, DalalError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(DalalError::provider_timeout(
                connector_name,
                capability.as_str(),
            ))
        })
    }

    /// Apply the optional overall deadline to `fut`.
    pub(crate) async fn with_request_deadline<T, Fut>(
        &self,
        capability: Capability,
        fut: Fut,
    ) -> Result<T, DalalError>
    where
        Fut: core::future::Future<Output = Result<T, DalalError>>,
    {
        match self.cfg.request_timeout {
            Some(deadline) => (tokio::time::timeout(deadline, fut).await)
                .unwrap_or_else(|_| Err(DalalError::request_timeout(capability.as_str()))),
            None => fut.await,
        }
    }

    /// Try every connector offering a collaborator capability in registration
    /// order and return the first success.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dalal::core::fetch_single",
            skip(self, call),
            fields(capability = capability.as_str(), what = %what),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        capability: Capability,
        what: String,
        call: F,
    ) -> Result<T, DalalError>
    where
        T: Send,
        F: Fn(Arc<dyn DalalConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, DalalError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<DalalError> = Vec::new();

        for c in &self.connectors {
            let Some(fut) = call(Arc::clone(c)) else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                capability,
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(v) => return Ok(v),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(connector = c.name(), error = %e, "collaborator call failed");
                    errors.push(e);
                }
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(what),
        ))
    }
}
