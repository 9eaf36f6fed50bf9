use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with the orchestrator's entry points and keep log and
/// error labels consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Historical daily OHLCV bars.
    History,
    /// Company metadata (sector, name, key statistics).
    Info,
    /// Latest close price for a symbol.
    Quote,
    /// Full list of tradable exchange symbols.
    Symbols,
    /// Recent news headlines for a symbol.
    News,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Info => "info",
            Self::Quote => "quote",
            Self::Symbols => "symbols",
            Self::News => "news",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
