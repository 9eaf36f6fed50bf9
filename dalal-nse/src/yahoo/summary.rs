use dalal_core::SymbolInfo;
use serde::Deserialize;

use super::chart::YahooErrorBody;
use crate::convert::volume;
use crate::error::AdapterError;

/// Modules requested from `quoteSummary`.
pub(crate) const MODULES: &str = "assetProfile,price,summaryDetail,defaultKeyStatistics";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryEnvelope {
    quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    #[serde(default)]
    result: Option<Vec<SummaryResult>>,
    #[serde(default)]
    error: Option<YahooErrorBody>,
}

/// `{ "raw": 123.4, "fmt": "123.40" }` wrapper; Yahoo sends `{}` when absent.
#[derive(Debug, Default, Deserialize)]
struct RawNum {
    #[serde(default)]
    raw: Option<f64>,
}

fn raw(v: Option<RawNum>) -> Option<f64> {
    v.and_then(|n| n.raw).filter(|x| x.is_finite())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    #[serde(default)]
    asset_profile: Option<AssetProfile>,
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    summary_detail: Option<SummaryDetail>,
    #[serde(default)]
    default_key_statistics: Option<KeyStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
    website: Option<String>,
    long_business_summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    symbol: Option<String>,
    short_name: Option<String>,
    long_name: Option<String>,
    currency: Option<String>,
    market_cap: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawNum>,
    dividend_yield: Option<RawNum>,
    fifty_two_week_high: Option<RawNum>,
    fifty_two_week_low: Option<RawNum>,
    average_volume: Option<RawNum>,
    beta: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    trailing_eps: Option<RawNum>,
    beta: Option<RawNum>,
}

impl From<SummaryResult> for SymbolInfo {
    fn from(r: SummaryResult) -> Self {
        let profile = r.asset_profile.unwrap_or_default();
        let price = r.price.unwrap_or_default();
        let detail = r.summary_detail.unwrap_or_default();
        let stats = r.default_key_statistics.unwrap_or_default();
        Self {
            symbol: price.symbol,
            short_name: price.short_name,
            long_name: price.long_name,
            sector: profile.sector.filter(|s| !s.is_empty()),
            industry: profile.industry.filter(|s| !s.is_empty()),
            website: profile.website,
            long_business_summary: profile.long_business_summary,
            currency: price.currency,
            market_cap: volume(raw(price.market_cap)),
            trailing_pe: raw(detail.trailing_pe),
            trailing_eps: raw(stats.trailing_eps),
            dividend_yield: raw(detail.dividend_yield),
            fifty_two_week_high: raw(detail.fifty_two_week_high),
            fifty_two_week_low: raw(detail.fifty_two_week_low),
            average_volume: volume(raw(detail.average_volume)),
            beta: raw(detail.beta).or_else(|| raw(stats.beta)),
        }
    }
}

/// Parse a `quoteSummary` payload into typed metadata.
pub(crate) fn parse(body: &str) -> Result<SymbolInfo, AdapterError> {
    let env: SummaryEnvelope = serde_json::from_str(body)?;
    if let Some(err) = env.quote_summary.error {
        return Err(err.into_error());
    }
    env.quote_summary
        .result
        .and_then(|r| r.into_iter().next())
        .map(SymbolInfo::from)
        .ok_or_else(|| AdapterError::NotFound("empty quoteSummary result".into()))
}
