use chrono::{Datelike, Days, NaiveDate, Weekday};
use dalal_core::RawBar;
use rust_decimal::Decimal;

pub fn by_symbol(s: &str) -> Option<Vec<RawBar>> {
    match s {
        "RELIANCE" => Some(flat("2024-01-01", 21, 100, 1_000_000)),
        "TCS" => Some(build(vec![
            ("2024-01-01", "3780", "3815", "3762", "3801.5", 1_250_000),
            ("2024-01-02", "3801.5", "3822", "3770", "3785", 1_310_000),
            ("2024-01-03", "3785", "3790", "3702.25", "3710", 1_870_000),
            ("2024-01-04", "3712", "3760", "3705", "3748.9", 1_420_000),
        ])),
        "INFY" => Some(build(vec![
            ("2024-01-01", "1540", "1552", "1531", "1548", 4_100_000),
            ("2024-01-02", "1548", "1561", "1540", "1557.35", 3_950_000),
            ("2024-01-03", "1557", "1559", "1522", "1526", 5_600_000),
        ])),
        "M&M" => Some(build(vec![
            ("2024-01-01", "1730", "1746", "1722", "1741", 2_000_000),
            ("2024-01-02", "1741", "1750", "1718", "1724.6", 2_150_000),
        ])),
        _ => None,
    }
}

/// `n` weekday bars starting at `start` with every price equal to `px`.
#[must_use]
pub fn flat(start: &str, n: usize, px: i64, volume: u64) -> Vec<RawBar> {
    let Ok(mut day) = NaiveDate::parse_from_str(start, "%Y-%m-%d") else {
        return Vec::new();
    };
    let price = Some(Decimal::from(px));
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            out.push(RawBar {
                date: Some(day),
                open: price,
                high: price,
                low: price,
                close: price,
                volume: Some(volume),
            });
        }
        day = day + Days::new(1);
    }
    out
}

fn dec(s: &str) -> Option<Decimal> {
    s.parse().ok()
}

fn build(rows: Vec<(&str, &str, &str, &str, &str, u64)>) -> Vec<RawBar> {
    rows.into_iter()
        .map(|(date, o, h, l, c, v)| RawBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            open: dec(o),
            high: dec(h),
            low: dec(l),
            close: dec(c),
            volume: Some(v),
        })
        .collect()
}
