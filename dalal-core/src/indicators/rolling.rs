//! Trailing-window primitives shared by the indicators.

/// Drop NaN and infinities.
#[must_use]
pub fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Rolling mean over the trailing `window` values, inclusive of the current one.
///
/// A value is produced once at least `min_periods` non-NaN observations fall in
/// the window. `window == 0` yields no values.
#[must_use]
pub fn rolling_mean(values: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let min_periods = min_periods.clamp(1, window);
    (0..values.len())
        .map(|i| {
            let lo = (i + 1).saturating_sub(window);
            let (sum, n) = values[lo..=i]
                .iter()
                .filter(|v| !v.is_nan())
                .fold((0.0_f64, 0usize), |(s, n), v| (s + v, n + 1));
            if n < min_periods {
                return None;
            }
            #[allow(clippy::cast_precision_loss)]
            let n = n as f64;
            finite(sum / n)
        })
        .collect()
}

/// Rolling sample standard deviation (denominator `n - 1`) with a full window.
#[must_use]
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window < 2 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let w = &values[i + 1 - window..=i];
            #[allow(clippy::cast_precision_loss)]
            let n = w.len() as f64;
            let mean = w.iter().sum::<f64>() / n;
            let ss = w.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            finite((ss / (n - 1.0)).sqrt())
        })
        .collect()
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded with the
/// first observation and without bias correction.
#[must_use]
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => alpha.mul_add(v - p, p),
        };
        out.push(next);
        prev = Some(next);
    }
    out
}
