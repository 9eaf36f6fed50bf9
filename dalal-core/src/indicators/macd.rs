use super::rolling::{ema, finite};

/// MACD columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Macd {
    /// Fast EMA of close.
    pub ema_fast: Vec<Option<f64>>,
    /// Slow EMA of close.
    pub ema_slow: Vec<Option<f64>>,
    /// `ema_fast - ema_slow`.
    pub macd: Vec<Option<f64>>,
    /// EMA of the MACD line.
    pub signal: Vec<Option<f64>>,
    /// `macd - signal`.
    pub histogram: Vec<Option<f64>>,
}

/// Moving average convergence/divergence. Defined from the first bar.
#[must_use]
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_span: usize) -> Macd {
    let f = ema(closes, fast);
    let s = ema(closes, slow);
    let line: Vec<f64> = f.iter().zip(&s).map(|(a, b)| a - b).collect();
    let signal = ema(&line, signal_span);
    let histogram = line.iter().zip(&signal).map(|(m, s)| m - s);
    Macd {
        ema_fast: f.iter().copied().map(finite).collect(),
        ema_slow: s.iter().copied().map(finite).collect(),
        histogram: histogram.map(finite).collect(),
        macd: line.into_iter().map(finite).collect(),
        signal: signal.into_iter().map(finite).collect(),
    }
}
