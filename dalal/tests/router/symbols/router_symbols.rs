use std::sync::Arc;

use dalal::{Capability, Dalal, DalalError};
use dalal_mock::DynamicMockConnector;

use crate::helpers::{MockBehavior, MockConnector};

#[tokio::test]
async fn listing_is_unique_short_and_sorted() {
    let dalal = Dalal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let list = dalal.symbols().await.unwrap();
    assert_eq!(
        list.symbols,
        vec!["BAJAJ-AUTO", "HDFCBANK", "INFY", "M&M", "RELIANCE", "TCS"]
    );
}

#[tokio::test]
async fn listing_is_cached() {
    let c = DynamicMockConnector::new_with_capabilities("nse-archive", &[Capability::Symbols]);
    c.set_symbols_behavior(MockBehavior::Return(vec!["TCS".into(), "INFY".into()]))
        .await;
    let dalal = Dalal::builder().with_connector(c.clone()).build().unwrap();

    let a = dalal.symbols().await.unwrap();
    let b = dalal.symbols().await.unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(c.symbols_calls(), 1);
}

#[tokio::test]
async fn upstream_failure_is_surfaced_and_not_cached() {
    let c = DynamicMockConnector::new_with_capabilities("nse-archive", &[Capability::Symbols]);
    c.set_symbols_behavior(MockBehavior::Fail(DalalError::transient(
        "nse-archive",
        "unexpected status 403 Forbidden",
    )))
    .await;
    let dalal = Dalal::builder().with_connector(c.clone()).build().unwrap();

    let err = dalal.symbols().await.unwrap_err();
    assert!(matches!(err, DalalError::AllProvidersFailed(ref es) if es.len() == 1));
    assert!(dalal.symbols().await.is_err());
    assert_eq!(c.symbols_calls(), 2);
}

#[tokio::test]
async fn no_symbol_capability_is_unsupported() {
    let c = DynamicMockConnector::new_with_capabilities("quotes", &[Capability::Quote]);
    let dalal = Dalal::builder().with_connector(c).build().unwrap();
    assert_eq!(
        dalal.symbols().await.unwrap_err(),
        DalalError::unsupported("symbols")
    );
}
