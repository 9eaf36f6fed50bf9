use dalal_core::{Capability, DalalError};
use thiserror::Error;

/// Failure inside a single upstream call, before it is attributed to a connector.
#[derive(Debug, Error)]
pub(crate) enum AdapterError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid csv payload: {0}")]
    Csv(#[from] csv::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl AdapterError {
    /// Attribute the failure to `connector`. Client-side timeouts become
    /// `ProviderTimeout`; everything else is transient.
    pub(crate) fn into_dalal(self, connector: &'static str, capability: Capability) -> DalalError {
        match self {
            Self::Http(e) if e.is_timeout() => {
                DalalError::provider_timeout(connector, capability.as_str())
            }
            Self::NotFound(what) => DalalError::data_unavailable(what),
            other => DalalError::transient(connector, other.to_string()),
        }
    }
}
