//! dalal-nse
//!
//! Connectors that implement `DalalConnector` against the public NSE, Yahoo
//! Finance and Moneycontrol endpoints:
//!
//! - [`YahooChartConnector`]: daily history over the requested window, company
//!   metadata and the latest close.
//! - [`YahooDownloadConnector`]: the CSV bulk-download variant of the history.
//! - [`YahooTrailingConnector`]: the trailing one-year history, ignoring the window.
//! - [`NseArchiveConnector`]: the exchange's historical-data API and symbol list.
//! - [`MoneycontrolConnector`]: headline scraping.
//!
//! Every connector owns its HTTP client and upstream record types. Base URLs can
//! be overridden so the connectors run against a local mock server.
#![warn(missing_docs)]

mod convert;
mod error;
/// Shared HTTP client construction.
pub mod http;
/// Moneycontrol headline scraper.
pub mod moneycontrol;
/// NSE historical data and symbol list.
pub mod nse;
/// Yahoo Finance chart, download and quote-summary endpoints.
pub mod yahoo;

pub use moneycontrol::MoneycontrolConnector;
pub use nse::NseArchiveConnector;
pub use yahoo::{YahooChartConnector, YahooClient, YahooDownloadConnector, YahooTrailingConnector};
