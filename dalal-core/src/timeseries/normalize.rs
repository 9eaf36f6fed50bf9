use crate::types::{DalalError, PriceBar, PriceSeries, RawSeries, Symbol};

/// Convert a winning raw series into canonical bars.
///
/// - Rows missing any of open/high/low/close are dropped.
/// - A row with all four prices but no date is a malformed upstream.
/// - Missing volume becomes zero.
/// - Bars are sorted ascending by date. Duplicate dates are kept in upstream order.
///
/// # Errors
/// `MalformedUpstream` for a dated-price row without a date, or
/// `DataUnavailable` when no row survives.
pub fn normalize_series(symbol: &Symbol, raw: RawSeries) -> Result<PriceSeries, DalalError> {
    let connector = raw.connector;
    let mut bars = Vec::with_capacity(raw.bars.len());
    let mut dropped = 0usize;

    for row in raw.bars {
        let (Some(open), Some(high), Some(low), Some(close)) =
            (row.open, row.high, row.low, row.close)
        else {
            dropped += 1;
            continue;
        };
        let Some(date) = row.date else {
            return Err(DalalError::malformed(connector, "Date"));
        };
        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume: row.volume.unwrap_or(0),
        });
    }

    #[cfg(feature = "tracing")]
    {
        if dropped > 0 {
            tracing::debug!(connector, dropped, "dropped rows with missing prices");
        }
    }
    #[cfg(not(feature = "tracing"))]
    let _ = dropped;

    if bars.is_empty() {
        return Err(DalalError::data_unavailable(format!("data for {symbol}")));
    }
    bars.sort_by_key(|b| b.date);

    Ok(PriceSeries {
        symbol: symbol.clone(),
        bars,
        connector,
    })
}
