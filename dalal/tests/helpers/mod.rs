// Shared fixtures for router tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use dalal::{Dalal, DalalBuilder, Symbol, WindowAdjust};
use dalal_core::RawBar;
use dalal_mock::DynamicMockConnector;

pub use dalal_mock::fixtures::history::flat;
pub use dalal_mock::{MockBehavior, MockConnector};

pub const RELIANCE: &str = "RELIANCE";
pub const TCS: &str = "TCS";

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

pub fn sym(s: &str) -> Symbol {
    Symbol::new(s).expect("valid test symbol")
}

/// January 2024, the window used by most history tests.
pub fn jan() -> (NaiveDate, NaiveDate) {
    (d(2024, 1, 1), d(2024, 1, 31))
}

/// Weekday bars in January 2024 with a constant price.
pub fn bars(n: usize, px: i64) -> Vec<RawBar> {
    flat("2024-01-01", n, px, 1_000)
}

/// A production-shaped five-step chain made of scripted connectors:
/// chart, exchange scrape, exchange scrape widened by 30 days, CSV download,
/// trailing year.
pub struct Chain {
    pub primary: Arc<DynamicMockConnector>,
    pub nse: Arc<DynamicMockConnector>,
    pub download: Arc<DynamicMockConnector>,
    pub trailing: Arc<DynamicMockConnector>,
}

impl Chain {
    pub fn new() -> Self {
        Self {
            primary: DynamicMockConnector::new_with_name("yahoo-chart"),
            nse: DynamicMockConnector::new_with_name("nse-archive"),
            download: DynamicMockConnector::new_with_name("yahoo-download"),
            trailing: DynamicMockConnector::new_with_name("yahoo-trailing"),
        }
    }

    pub fn builder(&self) -> DalalBuilder {
        Dalal::builder()
            .history_step(self.primary.clone(), WindowAdjust::AsRequested)
            .history_step(self.nse.clone(), WindowAdjust::AsRequested)
            .history_step(self.nse.clone(), WindowAdjust::WidenStart { days: 30 })
            .history_step(self.download.clone(), WindowAdjust::AsRequested)
            .history_step(self.trailing.clone(), WindowAdjust::AsRequested)
            .provider_timeout(Duration::from_millis(200))
    }

    pub fn dalal(&self) -> Dalal {
        self.builder().build().expect("valid chain")
    }

    pub fn history_calls(&self) -> [usize; 4] {
        [
            self.primary.history_calls(),
            self.nse.history_calls(),
            self.download.history_calls(),
            self.trailing.history_calls(),
        ]
    }
}
