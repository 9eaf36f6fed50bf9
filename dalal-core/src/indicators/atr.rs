use super::rolling::{finite, rolling_mean};

/// True range and its rolling average.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AverageTrueRange {
    /// Per-bar true range.
    pub true_range: Vec<Option<f64>>,
    /// Rolling mean of the true range over a full window.
    pub atr: Vec<Option<f64>>,
}

/// `TR = max(H - L, |H - prevC|, |L - prevC|)`; the first bar only has `H - L`.
#[must_use]
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    let n = highs.len().min(lows.len()).min(closes.len());
    (0..n)
        .map(|i| {
            let hl = highs[i] - lows[i];
            if i == 0 {
                return hl;
            }
            let pc = closes[i - 1];
            hl.max((highs[i] - pc).abs()).max((lows[i] - pc).abs())
        })
        .collect()
}

/// Average true range. The first `window - 1` ATR values are `None`.
#[must_use]
pub fn average_true_range(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    window: usize,
) -> AverageTrueRange {
    let tr = true_range(highs, lows, closes);
    let atr = rolling_mean(&tr, window, window);
    AverageTrueRange {
        true_range: tr.into_iter().map(finite).collect(),
        atr,
    }
}
