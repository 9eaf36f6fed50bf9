use chrono::NaiveDate;
use dalal_core::RawBar;
use serde::Deserialize;

use crate::convert::{price, volume};
use crate::error::AdapterError;

/// One row of the bulk-download CSV. Yahoo writes `null` for missing cells.
#[derive(Debug, Deserialize)]
struct DownloadRow {
    #[serde(rename = "Date", default)]
    date: Option<String>,
    #[serde(rename = "Open", default, deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(rename = "High", default, deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(rename = "Low", default, deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(rename = "Close", default, deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(rename = "Volume", default, deserialize_with = "csv::invalid_option")]
    volume: Option<f64>,
}

impl From<DownloadRow> for RawBar {
    fn from(r: DownloadRow) -> Self {
        Self {
            date: r
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()),
            open: price(r.open),
            high: price(r.high),
            low: price(r.low),
            close: price(r.close),
            volume: volume(r.volume),
        }
    }
}

/// Parse the `Date,Open,High,Low,Close,Adj Close,Volume` CSV.
pub(crate) fn parse(body: &str) -> Result<Vec<RawBar>, AdapterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    let mut out = Vec::new();
    for row in rdr.deserialize::<DownloadRow>() {
        out.push(row?.into());
    }
    Ok(out)
}
