use dalal::CacheConfig;

use crate::helpers::{Chain, MockBehavior, RELIANCE, TCS, bars, d, jan, sym};

#[tokio::test]
async fn repeated_request_is_served_from_cache() {
    let chain = Chain::new();
    chain
        .primary
        .set_default_history(MockBehavior::Return(bars(5, 100)))
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    let a = dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap();
    let b = dalal.stock_data(&sym("reliance"), end, start).await.unwrap();

    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(chain.primary.history_calls(), 1);
}

#[tokio::test]
async fn cache_key_includes_symbol_and_window() {
    let chain = Chain::new();
    chain
        .primary
        .set_default_history(MockBehavior::Return(bars(5, 100)))
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap();
    dalal.stock_data(&sym(TCS), start, end).await.unwrap();
    dalal.stock_data(&sym(RELIANCE), start, d(2024, 1, 15)).await.unwrap();
    assert_eq!(chain.primary.history_calls(), 3);
}

#[tokio::test]
async fn zero_ttl_disables_caching() {
    let chain = Chain::new();
    chain
        .primary
        .set_default_history(MockBehavior::Return(bars(5, 100)))
        .await;
    let dalal = chain
        .builder()
        .cache(CacheConfig {
            ttl_ms: 0,
            max_entries: None,
        })
        .build()
        .unwrap();

    let (start, end) = jan();
    dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap();
    dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap();
    assert_eq!(chain.primary.history_calls(), 2);
}

#[tokio::test]
async fn failures_are_not_cached() {
    let chain = Chain::new();
    let dalal = chain.dalal();

    let (start, end) = jan();
    assert!(dalal.stock_data(&sym(RELIANCE), start, end).await.is_err());
    chain
        .primary
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(5, 100)))
        .await;
    assert!(dalal.stock_data(&sym(RELIANCE), start, end).await.is_ok());
    assert_eq!(chain.primary.history_calls(), 2);
}
