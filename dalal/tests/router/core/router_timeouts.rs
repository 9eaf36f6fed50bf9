use std::time::Duration;

use dalal::{DalalError, FetchStrategy};

use crate::helpers::{Chain, MockBehavior, RELIANCE, bars, jan, sym};

#[tokio::test]
async fn hanging_source_times_out_and_falls_back() {
    let chain = Chain::new();
    chain
        .primary
        .set_history_behavior(RELIANCE, MockBehavior::Hang)
        .await;
    chain
        .nse
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(2, 100)))
        .await;
    let dalal = chain
        .builder()
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();

    let (start, end) = jan();
    let series = dalal.price_history(&sym(RELIANCE), start, end).await.unwrap();
    assert_eq!(series.connector, "nse-archive");
}

#[tokio::test]
async fn request_deadline_bounds_the_whole_chain() {
    let chain = Chain::new();
    for c in [&chain.primary, &chain.nse, &chain.download, &chain.trailing] {
        c.set_default_history(MockBehavior::Hang).await;
    }
    let dalal = chain
        .builder()
        .provider_timeout(Duration::from_millis(40))
        .request_timeout(Duration::from_millis(60))
        .build()
        .unwrap();

    let (start, end) = jan();
    let err = dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap_err();
    assert_eq!(err, DalalError::request_timeout("history"));
    assert!(chain.nse.history_calls() >= 1);
    assert_eq!(chain.download.history_calls(), 0);
}

#[tokio::test]
async fn all_steps_timing_out_without_deadline_is_unavailable() {
    let chain = Chain::new();
    for c in [&chain.primary, &chain.nse, &chain.download, &chain.trailing] {
        c.set_default_history(MockBehavior::Hang).await;
    }
    let dalal = chain
        .builder()
        .provider_timeout(Duration::from_millis(10))
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let (start, end) = jan();
    let err = dalal.price_history(&sym(RELIANCE), start, end).await.unwrap_err();
    assert!(matches!(err, DalalError::DataUnavailable { .. }));
}
