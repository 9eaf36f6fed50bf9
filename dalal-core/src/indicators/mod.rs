//! Technical indicators over a daily price series.
//!
//! Every indicator group is computed independently in `f64` and merged per bar
//! into an [`IndicatorSet`]. Warm-up periods and non-finite results are `None`.

/// Average true range.
pub mod atr;
/// Bollinger bands.
pub mod bollinger;
/// Moving average convergence/divergence.
pub mod macd;
/// Trailing-window primitives.
pub mod rolling;
/// Relative strength index.
pub mod rsi;

use crate::types::{AnnotatedBar, IndicatorConfig, IndicatorSet, PriceBar, PriceSeries};

/// Compute the indicator set for every bar, aligned by index.
#[must_use]
pub fn compute_indicators(bars: &[PriceBar], cfg: &IndicatorConfig) -> Vec<IndicatorSet> {
    let closes: Vec<f64> = bars.iter().map(PriceBar::close_f64).collect();
    let highs: Vec<f64> = bars.iter().map(PriceBar::high_f64).collect();
    let lows: Vec<f64> = bars.iter().map(PriceBar::low_f64).collect();

    let bb = bollinger::bollinger(&closes, cfg.bollinger_window, cfg.bollinger_k);
    let atr = atr::average_true_range(&highs, &lows, &closes, cfg.atr_window);
    let macd = macd::macd(&closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);
    let rsi = rsi::rsi(&closes, cfg.rsi_window);

    (0..bars.len())
        .map(|i| IndicatorSet {
            bb_mid: bb.mid[i],
            bb_std: bb.std[i],
            bb_upper: bb.upper[i],
            bb_lower: bb.lower[i],
            true_range: atr.true_range[i],
            atr: atr.atr[i],
            ema_fast: macd.ema_fast[i],
            ema_slow: macd.ema_slow[i],
            macd: macd.macd[i],
            macd_signal: macd.signal[i],
            macd_histogram: macd.histogram[i],
            rsi: rsi[i],
        })
        .collect()
}

/// Annotate every bar of a normalized series with its indicators.
#[must_use]
pub fn annotate(series: PriceSeries, cfg: &IndicatorConfig) -> Vec<AnnotatedBar> {
    let sets = compute_indicators(&series.bars, cfg);
    series
        .bars
        .into_iter()
        .zip(sets)
        .map(|(bar, indicators)| AnnotatedBar { bar, indicators })
        .collect()
}
