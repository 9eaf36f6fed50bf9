use chrono::NaiveDate;
use dalal_core::RawBar;
use serde::{Deserialize, Deserializer};

use crate::error::AdapterError;
use crate::convert::{price, volume};

#[derive(Debug, Deserialize)]
struct HistoricalEnvelope {
    #[serde(default)]
    data: Vec<HistoricalRow>,
    #[serde(default)]
    error: Option<String>,
}

/// One row of `/api/historical/cm/equity`. Numbers arrive as JSON numbers on
/// most days and as strings on some, so both are accepted.
#[derive(Debug, Deserialize)]
struct HistoricalRow {
    #[serde(rename = "CH_TIMESTAMP", default)]
    timestamp: Option<String>,
    #[serde(rename = "CH_OPENING_PRICE", default, deserialize_with = "lenient_f64")]
    open: Option<f64>,
    #[serde(rename = "CH_TRADE_HIGH_PRICE", default, deserialize_with = "lenient_f64")]
    high: Option<f64>,
    #[serde(rename = "CH_TRADE_LOW_PRICE", default, deserialize_with = "lenient_f64")]
    low: Option<f64>,
    #[serde(rename = "CH_CLOSING_PRICE", default, deserialize_with = "lenient_f64")]
    close: Option<f64>,
    #[serde(
        rename = "CH_TOT_TRADED_QTY",
        alias = "CH_TOTAL_TRADED_QTY",
        default,
        deserialize_with = "lenient_f64"
    )]
    volume: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrText {
    Num(f64),
    Text(String),
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<NumOrText>::deserialize(d)? {
        Some(NumOrText::Num(n)) => Some(n),
        Some(NumOrText::Text(s)) => s.trim().replace(',', "").parse().ok(),
        None => None,
    })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d-%b-%Y"))
        .ok()
}

impl From<HistoricalRow> for RawBar {
    fn from(r: HistoricalRow) -> Self {
        Self {
            date: r.timestamp.as_deref().and_then(parse_date),
            open: price(r.open),
            high: price(r.high),
            low: price(r.low),
            close: price(r.close),
            volume: volume(r.volume),
        }
    }
}

/// Parse the historical-data payload.
pub(crate) fn parse(body: &str) -> Result<Vec<RawBar>, AdapterError> {
    let env: HistoricalEnvelope = serde_json::from_str(body)?;
    if let Some(err) = env.error.filter(|e| !e.is_empty()) {
        return Err(AdapterError::Upstream(err));
    }
    Ok(env.data.into_iter().map(RawBar::from).collect())
}

/// NSE's `dd-mm-yyyy` query format.
pub(crate) fn nse_date(d: NaiveDate) -> String {
    d.format("%d-%m-%Y").to_string()
}
