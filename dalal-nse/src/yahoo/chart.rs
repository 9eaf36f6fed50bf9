use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use dalal_core::RawBar;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::convert::{price, volume};
use crate::error::AdapterError;

/// Exchange timezone assumed when the payload does not name one.
pub(crate) const DEFAULT_TZ: Tz = chrono_tz::Asia::Kolkata;

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<YahooErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct YahooErrorBody {
    pub(crate) code: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

impl YahooErrorBody {
    pub(crate) fn into_error(self) -> AdapterError {
        let msg = match self.description {
            Some(d) => format!("{}: {d}", self.code),
            None => self.code.clone(),
        };
        if self.code.eq_ignore_ascii_case("not found") {
            AdapterError::NotFound(msg)
        } else {
            AdapterError::Upstream(msg)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    exchange_timezone_name: Option<String>,
    #[serde(default)]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Parse a chart payload into its single result.
pub(crate) fn parse(body: &str) -> Result<ChartResult, AdapterError> {
    let env: ChartEnvelope = serde_json::from_str(body)?;
    if let Some(err) = env.chart.error {
        return Err(err.into_error());
    }
    env.chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| AdapterError::NotFound("empty chart result".into()))
}

impl ChartResult {
    fn timezone(&self) -> Tz {
        self.meta
            .exchange_timezone_name
            .as_deref()
            .and_then(|n| n.parse::<Tz>().ok())
            .unwrap_or(DEFAULT_TZ)
    }

    fn local_date(tz: Tz, ts: i64) -> Option<NaiveDate> {
        DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&tz).date_naive())
    }

    /// Rows keyed by exchange-local trading date.
    pub(crate) fn into_bars(self) -> Vec<RawBar> {
        let tz = self.timezone();
        let q = self.indicators.quote.into_iter().next().unwrap_or_default();
        let at = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();
        self.timestamp
            .iter()
            .enumerate()
            .map(|(i, ts)| RawBar {
                date: Self::local_date(tz, *ts),
                open: price(at(&q.open, i)),
                high: price(at(&q.high, i)),
                low: price(at(&q.low, i)),
                close: price(at(&q.close, i)),
                volume: volume(at(&q.volume, i)),
            })
            .collect()
    }

    /// Last non-null close, falling back to the regular market price.
    pub(crate) fn latest_close(&self) -> Option<Decimal> {
        self.indicators
            .quote
            .first()
            .and_then(|q| q.close.iter().rev().find_map(|c| price(*c)))
            .or_else(|| price(self.meta.regular_market_price))
    }
}
