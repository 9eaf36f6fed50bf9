use std::sync::Arc;

use dalal::{Capability, Dalal, DalalError, LatestPrice};
use dalal_mock::DynamicMockConnector;
use rust_decimal::Decimal;
use serde_json::json;

use crate::helpers::{MockBehavior, MockConnector, TCS};

#[tokio::test]
async fn batch_normalizes_symbols_and_never_aborts() {
    let dalal = Dalal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let out = dalal
        .batch_prices(&[" tcs", "INFY ", "", "fail", "a/b", "TCS"])
        .await;

    assert_eq!(out.len(), 4);
    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!({"A/B": "N/A", "FAIL": "N/A", "INFY": 1526.0, "TCS": 3748.9})
    );
}

#[tokio::test]
async fn latest_close_falls_back_across_connectors() {
    let first = DynamicMockConnector::new_with_capabilities("first", &[Capability::Quote]);
    first
        .set_quote_behavior(
            TCS,
            MockBehavior::Fail(DalalError::transient("first", "unexpected status 429")),
        )
        .await;
    let second = DynamicMockConnector::new_with_capabilities("second", &[Capability::Quote]);
    second
        .set_quote_behavior(TCS, MockBehavior::Return(Decimal::new(37489, 1)))
        .await;
    let dalal = Dalal::builder()
        .with_connector(first.clone())
        .with_connector(second.clone())
        .build()
        .unwrap();

    let out = dalal.batch_prices(&[TCS]).await;
    assert_eq!(out[TCS], LatestPrice::Price(Decimal::new(37489, 1)));
    assert_eq!((first.quote_calls(), second.quote_calls()), (1, 1));
}

#[tokio::test]
async fn empty_batch_is_empty() {
    let dalal = Dalal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    let none: [&str; 0] = [];
    assert!(dalal.batch_prices(&none).await.is_empty());
}
