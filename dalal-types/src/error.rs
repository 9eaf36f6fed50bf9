use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the dalal workspace.
///
/// Adapter-level failures (`Transient`, `ProviderTimeout`) are swallowed by the
/// fallback chain; `DataUnavailable` and `MalformedUpstream` are the two outcomes
/// that reach callers of the price-history pipeline.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DalalError {
    /// No registered connector offers the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label (e.g. "news").
        capability: String,
    },

    /// Invalid input argument (bad symbol, unparsable date).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with returned data that are not tied to a specific field.
    #[error("data issue: {0}")]
    Data(String),

    /// A network, status or parse failure inside a single connector.
    #[error("{connector} failed: {msg}")]
    Transient {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A source returned rows missing a required field after normalization.
    #[error("{connector} returned data without a {field} field")]
    MalformedUpstream {
        /// Connector whose series was malformed.
        connector: String,
        /// Canonical field name that was missing (e.g. "Date").
        field: String,
    },

    /// Every step of the fallback chain produced nothing usable.
    #[error("could not fetch {what} from any source")]
    DataUnavailable {
        /// Description of the missing data, e.g. "data for RELIANCE".
        what: String,
    },

    /// All connectors tried for a collaborator capability failed.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<DalalError>),

    /// An individual connector call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label.
        capability: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl DalalError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Transient` error with the connector name and message.
    pub fn transient(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transient {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `MalformedUpstream` error.
    pub fn malformed(connector: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MalformedUpstream {
            connector: connector.into(),
            field: field.into(),
        }
    }

    /// Helper: build a `DataUnavailable` error.
    pub fn data_unavailable(what: impl Into<String>) -> Self {
        Self::DataUnavailable { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// True for failures that only mean "this source produced nothing" and must
    /// drive fallback rather than reach the caller.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transient { .. } | Self::ProviderTimeout { .. } | Self::Data(_)
        )
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
