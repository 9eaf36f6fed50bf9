use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Vendor float to decimal price; NaN and infinities are dropped.
pub(crate) fn price(v: Option<f64>) -> Option<Decimal> {
    v.filter(|x| x.is_finite())
        .and_then(Decimal::from_f64)
        .map(|d| d.round_dp(4))
}

/// Vendor float to a non-negative integer count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn volume(v: Option<f64>) -> Option<u64> {
    v.filter(|x| x.is_finite() && *x >= 0.0).map(|x| x as u64)
}
