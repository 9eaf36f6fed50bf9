//! dalal-server
//!
//! axum front end for the dalal orchestrator. Every route is a thin adapter:
//! it validates path and query input, calls into [`dalal::Dalal`] and maps
//! errors to status codes through [`ApiError`].
#![warn(missing_docs)]

/// Environment configuration.
pub mod config;
/// Error to HTTP response mapping.
pub mod error;
/// Route table.
pub mod routes;

use std::sync::Arc;

use dalal::{Dalal, DalalError, WindowAdjust};
use dalal_nse::{
    MoneycontrolConnector, NseArchiveConnector, YahooChartConnector, YahooClient,
    YahooDownloadConnector, YahooTrailingConnector,
};

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::app;

/// Orchestrator wired to the live upstreams in the standard fallback order:
/// Yahoo chart, NSE, NSE widened by 30 days, Yahoo CSV download, Yahoo trailing
/// year. Moneycontrol serves headlines.
///
/// # Errors
/// Fails if an HTTP client cannot be built.
pub fn live_dalal(cfg: &ServerConfig) -> Result<Dalal, DalalError> {
    let yahoo = Arc::new(YahooClient::new()?);
    let nse = Arc::new(NseArchiveConnector::new()?);

    Dalal::builder()
        .config(cfg.dalal_config())
        .history_step(
            Arc::new(YahooChartConnector::new(Arc::clone(&yahoo))),
            WindowAdjust::AsRequested,
        )
        .history_step(nse.clone(), WindowAdjust::AsRequested)
        .history_step(nse, WindowAdjust::WidenStart { days: 30 })
        .history_step(
            Arc::new(YahooDownloadConnector::new(Arc::clone(&yahoo))),
            WindowAdjust::AsRequested,
        )
        .history_step(
            Arc::new(YahooTrailingConnector::new(yahoo)),
            WindowAdjust::AsRequested,
        )
        .with_connector(Arc::new(MoneycontrolConnector::new()?))
        .build()
}
