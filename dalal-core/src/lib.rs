//! dalal-core
//!
//! Core types, traits, and pure computations shared across the dalal workspace.
//!
//! - `types`: price bars, raw upstream series, symbol metadata and endpoint payloads.
//! - `connector`: the `DalalConnector` trait and its capability role traits.
//! - `timeseries`: request-window normalization and raw-series normalization.
//! - `indicators`: Bollinger Bands, ATR, MACD and RSI over a price series.
//!
//! Nothing in this crate performs I/O; connectors live in `dalal-nse` and the
//! fallback orchestration lives in `dalal`.
#![warn(missing_docs)]

/// Connector capability traits and the primary `DalalConnector` interface.
pub mod connector;
/// Technical indicator engine.
pub mod indicators;
/// Window and series normalization helpers.
pub mod timeseries;
pub mod types;

pub use connector::{DalalConnector, SourceOutcome};
pub use indicators::{annotate, compute_indicators};
pub use timeseries::normalize::normalize_series;
pub use types::*;
