use std::sync::Arc;

use dalal::{Dalal, DalalError, SymbolInfo};
use serde_json::Value;

use crate::helpers::{Chain, MockBehavior, MockConnector, RELIANCE, bars, jan, sym};

#[tokio::test]
async fn flat_reliance_series_is_annotated() {
    let dalal = Dalal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let (start, end) = jan();
    let data = dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap();
    let h = &data.history;

    assert_eq!(h.len(), 21);
    assert_eq!(h[18].indicators.bb_mid, None);
    assert_eq!(h[19].indicators.bb_mid, Some(100.0));
    assert_eq!(h[20].indicators.bb_mid, Some(100.0));
    assert_eq!(h[20].indicators.rsi, Some(100.0));
    assert_eq!(h[12].indicators.atr, None);
    assert!(h[14..].iter().all(|b| b.indicators.atr == Some(0.0)));
    assert_eq!(data.info.sector.as_deref(), Some("Energy"));
}

#[tokio::test]
async fn stock_data_serializes_with_canonical_keys() {
    let dalal = Dalal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let (start, end) = jan();
    let data = dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap();
    let v: Value = serde_json::to_value(&*data).unwrap();

    let first = &v["history"][0];
    assert_eq!(first["Date"], "2024-01-01");
    assert_eq!(first["Close"], 100.0);
    assert_eq!(first["Volume"], 1_000_000);
    assert!(first["BB_Mid"].is_null());
    assert_eq!(v["history"][20]["RSI"], 100.0);
    assert_eq!(v["info"]["sector"], "Energy");
}

#[tokio::test]
async fn info_comes_from_the_winning_connector() {
    let chain = Chain::new();
    chain
        .primary
        .set_info_behavior(
            RELIANCE,
            MockBehavior::Return(SymbolInfo {
                sector: Some("Primary".into()),
                ..SymbolInfo::default()
            }),
        )
        .await;
    chain
        .nse
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(3, 100)))
        .await;
    chain
        .nse
        .set_info_behavior(
            RELIANCE,
            MockBehavior::Return(SymbolInfo {
                sector: Some("Energy".into()),
                ..SymbolInfo::default()
            }),
        )
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    let data = dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap();
    assert_eq!(data.info.sector.as_deref(), Some("Energy"));
    assert_eq!(chain.primary.info_calls(), 0);
}

#[tokio::test]
async fn failed_info_is_served_empty() {
    let chain = Chain::new();
    chain
        .primary
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(3, 100)))
        .await;
    chain
        .primary
        .set_info_behavior(
            RELIANCE,
            MockBehavior::Fail(DalalError::transient("yahoo-chart", "Invalid Crumb")),
        )
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    let data = dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap();
    assert!(data.info.is_empty());
    assert_eq!(serde_json::to_value(&data.info).unwrap(), serde_json::json!({}));
    assert_eq!(chain.history_calls(), [1, 0, 0, 0]);
}
