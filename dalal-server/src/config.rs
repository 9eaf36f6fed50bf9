use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use dalal::{CacheConfig, DalalConfig, FetchStrategy};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 15;

/// Process configuration read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `DALAL_BIND_ADDR`, default `0.0.0.0:8000`.
    pub bind_addr: SocketAddr,
    /// `DALAL_CACHE_TTL_SECS`, default one hour. Zero disables caching.
    pub cache_ttl: Duration,
    /// `DALAL_PROVIDER_TIMEOUT_SECS`, default 15 s.
    pub provider_timeout: Duration,
    /// `DALAL_REQUEST_TIMEOUT_SECS`, unset by default.
    pub request_timeout: Option<Duration>,
    /// `DALAL_FETCH_STRATEGY`: `priority` (default) or `latency`.
    pub fetch_strategy: FetchStrategy,
}

impl ServerConfig {
    /// Read `DALAL_*` variables from the process environment.
    ///
    /// # Errors
    /// Fails when a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    /// Fails when a variable is set but cannot be parsed.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let secs = |key: &str| -> Result<Option<u64>> {
            var(key)
                .map(|v| v.parse::<u64>().with_context(|| format!("{key} must be whole seconds, got {v:?}")))
                .transpose()
        };

        let bind_addr = var("DALAL_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("DALAL_BIND_ADDR must be host:port")?;

        let fetch_strategy = match var("DALAL_FETCH_STRATEGY").as_deref() {
            None | Some("priority") => FetchStrategy::PriorityWithFallback,
            Some("latency") => FetchStrategy::Latency,
            Some(other) => bail!("DALAL_FETCH_STRATEGY must be priority or latency, got {other:?}"),
        };

        Ok(Self {
            bind_addr,
            cache_ttl: Duration::from_secs(secs("DALAL_CACHE_TTL_SECS")?.unwrap_or(DEFAULT_CACHE_TTL_SECS)),
            provider_timeout: Duration::from_secs(
                secs("DALAL_PROVIDER_TIMEOUT_SECS")?.unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
            ),
            request_timeout: secs("DALAL_REQUEST_TIMEOUT_SECS")?.map(Duration::from_secs),
            fetch_strategy,
        })
    }

    /// Orchestrator settings derived from the environment.
    #[must_use]
    pub fn dalal_config(&self) -> DalalConfig {
        DalalConfig {
            fetch_strategy: self.fetch_strategy,
            provider_timeout: self.provider_timeout,
            request_timeout: self.request_timeout,
            cache: CacheConfig {
                ttl_ms: u64::try_from(self.cache_ttl.as_millis()).unwrap_or(u64::MAX),
                max_entries: None,
            },
            ..DalalConfig::default()
        }
    }
}
