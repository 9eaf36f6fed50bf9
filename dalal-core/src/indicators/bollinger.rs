use super::rolling::{finite, rolling_mean, rolling_std};

/// Bollinger band columns, aligned with the input closes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BollingerBands {
    /// Rolling mean.
    pub mid: Vec<Option<f64>>,
    /// Rolling sample standard deviation.
    pub std: Vec<Option<f64>>,
    /// `mid + k * std`.
    pub upper: Vec<Option<f64>>,
    /// `mid - k * std`.
    pub lower: Vec<Option<f64>>,
}

/// Compute Bollinger bands over `closes`. The first `window - 1` entries are `None`.
#[must_use]
pub fn bollinger(closes: &[f64], window: usize, k: f64) -> BollingerBands {
    let mid = rolling_mean(closes, window, window);
    let std = rolling_std(closes, window);
    let band = |sign: f64| -> Vec<Option<f64>> {
        mid.iter()
            .zip(&std)
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => finite((sign * k).mul_add(*s, *m)),
                _ => None,
            })
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);
    BollingerBands {
        mid,
        std,
        upper,
        lower,
    }
}
