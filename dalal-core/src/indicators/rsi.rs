use super::rolling::{finite, rolling_mean};

/// Relative strength index over simple rolling means of gains and losses.
///
/// Gains and losses are zero on the first bar and the rolling means accept a
/// partial window, so every bar gets a value. A window with no losses yields
/// exactly 100.
#[must_use]
pub fn rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    for (i, c) in closes.iter().enumerate() {
        let delta = if i == 0 { 0.0 } else { c - closes[i - 1] };
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }
    let avg_gain = rolling_mean(&gains, window, 1);
    let avg_loss = rolling_mean(&losses, window, 1);

    avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(g, l)| match (g, l) {
            (Some(_), Some(l)) if l == 0.0 => Some(100.0),
            (Some(g), Some(l)) => finite(100.0 - 100.0 / (1.0 + g / l)),
            _ => None,
        })
        .collect()
}
