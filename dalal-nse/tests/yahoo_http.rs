use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use dalal_core::connector::{DalalConnector, HistorySource, InfoProvider, QuoteProvider};
use dalal_core::{DalalError, DateWindow, SourceOutcome, Symbol};
use dalal_nse::{YahooChartConnector, YahooClient, YahooDownloadConnector, YahooTrailingConnector};
use httpmock::prelude::*;
use rust_decimal::Decimal;

const CHART: &str = r#"{"chart":{"result":[{
    "meta":{"currency":"INR","symbol":"TCS.NS","exchangeTimezoneName":"Asia/Kolkata","regularMarketPrice":3750.0},
    "timestamp":[1704167100,1704253500],
    "indicators":{"quote":[{"open":[3780.0,3801.5],"high":[3815.0,3822.0],"low":[3762.0,3770.0],
        "close":[3801.5,3785.0],"volume":[1250000,1310000]}]}
}],"error":null}}"#;

fn client(server: &MockServer) -> Arc<YahooClient> {
    Arc::new(
        YahooClient::with_base_urls(server.base_url(), server.base_url(), Duration::from_millis(500))
            .unwrap(),
    )
}

fn window() -> DateWindow {
    DateWindow::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
    )
}

#[tokio::test]
async fn chart_history_requests_window_and_returns_local_dates() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v8/finance/chart/TCS.NS")
                .query_param("interval", "1d")
                .query_param("period1", "1704067200")
                .query_param("period2", "1704326400");
            then.status(200)
                .header("content-type", "application/json")
                .body(CHART);
        })
        .await;

    let yc = YahooChartConnector::new(client(&server));
    let out = yc.fetch(&Symbol::new("tcs").unwrap(), window()).await;
    m.assert_async().await;

    let series = out.into_usable().expect("usable series");
    assert_eq!(series.connector, "yahoo-chart");
    assert_eq!(series.bars.len(), 2);
    assert_eq!(series.bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2));
    assert_eq!(series.bars[1].close, Some(Decimal::from(3785)));
}

#[tokio::test]
async fn latest_close_uses_short_range() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v8/finance/chart/TCS.NS")
                .query_param("range", "5d");
            then.status(200).body(CHART);
        })
        .await;

    let yc = YahooChartConnector::new(client(&server));
    let px = yc.latest_close(&Symbol::new("TCS").unwrap()).await.unwrap();
    m.assert_async().await;
    assert_eq!(px, Decimal::from(3785));
}

#[tokio::test]
async fn trailing_connector_ignores_window() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v8/finance/chart/TCS.NS")
                .query_param("range", "1y");
            then.status(200).body(CHART);
        })
        .await;

    let yc = YahooTrailingConnector::new(client(&server));
    assert_eq!(yc.name(), "yahoo-trailing");
    let out = yc.fetch(&Symbol::new("TCS").unwrap(), window()).await;
    m.assert_async().await;
    assert!(out.is_usable());
}

#[tokio::test]
async fn download_parses_csv_and_sends_crumb() {
    let server = MockServer::start_async().await;
    let crumb = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/test/getcrumb");
            then.status(200).body("abc123");
        })
        .await;
    let csv = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v7/finance/download/INFY.NS")
                .query_param("crumb", "abc123");
            then.status(200).body(
                "Date,Open,High,Low,Close,Adj Close,Volume\n\
                 2024-01-02,1500,1520,1490,1510,1510,900000\n\
                 2024-01-03,null,null,null,null,null,null\n",
            );
        })
        .await;

    let yd = YahooDownloadConnector::new(client(&server));
    let out = yd.fetch(&Symbol::new("INFY").unwrap(), window()).await;
    crumb.assert_async().await;
    csv.assert_async().await;

    let SourceOutcome::Series(series) = out else {
        panic!("expected a series");
    };
    assert_eq!(series.bars.len(), 2);
    assert!(series.bars[0].has_prices());
    assert!(!series.bars[1].has_prices());
}

#[tokio::test]
async fn summary_maps_to_symbol_info() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v10/finance/quoteSummary/RELIANCE.NS")
                .query_param_exists("modules");
            then.status(200).body(
                r#"{"quoteSummary":{"result":[{
                    "assetProfile":{"sector":"Energy"},
                    "price":{"symbol":"RELIANCE.NS","longName":"Reliance Industries Limited"}
                }],"error":null}}"#,
            );
        })
        .await;

    let yc = YahooChartConnector::new(client(&server));
    let info = yc.info(&Symbol::new("RELIANCE").unwrap()).await.unwrap();
    assert_eq!(info.sector.as_deref(), Some("Energy"));
    assert_eq!(info.long_name.as_deref(), Some("Reliance Industries Limited"));
}

#[tokio::test]
async fn not_found_is_empty_and_server_error_is_failed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/NOPE.NS");
            then.status(404).body(
                r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
            );
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/TCS.NS");
            then.status(500);
        })
        .await;

    let yc = YahooChartConnector::new(client(&server));
    assert_eq!(
        yc.fetch(&Symbol::new("NOPE").unwrap(), window()).await,
        SourceOutcome::Empty
    );
    assert!(matches!(
        yc.fetch(&Symbol::new("TCS").unwrap(), window()).await,
        SourceOutcome::Failed(DalalError::Transient { .. })
    ));
}

#[tokio::test]
async fn slow_upstream_is_a_provider_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v8/finance/chart/TCS.NS");
            then.status(200).delay(Duration::from_secs(2)).body(CHART);
        })
        .await;

    let yc = YahooChartConnector::new(client(&server));
    let err = yc.latest_close(&Symbol::new("TCS").unwrap()).await.unwrap_err();
    assert!(matches!(err, DalalError::ProviderTimeout { .. }), "{err:?}");
}
