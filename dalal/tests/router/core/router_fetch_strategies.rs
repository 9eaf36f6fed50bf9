use std::time::Duration;

use dalal::FetchStrategy;
use rust_decimal::Decimal;

use crate::helpers::{Chain, MockBehavior, RELIANCE, bars, jan, sym};

#[tokio::test]
async fn latency_prefers_slower_higher_priority_source() {
    let chain = Chain::new();
    chain
        .primary
        .set_history_behavior(
            RELIANCE,
            MockBehavior::Delay(Duration::from_millis(60), bars(3, 111)),
        )
        .await;
    chain
        .nse
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(3, 222)))
        .await;
    let dalal = chain
        .builder()
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let (start, end) = jan();
    let series = dalal.price_history(&sym(RELIANCE), start, end).await.unwrap();
    assert_eq!(series.connector, "yahoo-chart");
    assert_eq!(series.bars[0].close, Decimal::from(111));
}

#[tokio::test]
async fn latency_skips_unusable_higher_priority_sources() {
    let chain = Chain::new();
    chain
        .download
        .set_history_behavior(
            RELIANCE,
            MockBehavior::Delay(Duration::from_millis(20), bars(3, 333)),
        )
        .await;
    chain
        .trailing
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(3, 444)))
        .await;
    let dalal = chain
        .builder()
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let (start, end) = jan();
    let series = dalal.price_history(&sym(RELIANCE), start, end).await.unwrap();
    assert_eq!(series.connector, "yahoo-download");
    assert_eq!(chain.primary.history_calls(), 1);
    assert_eq!(chain.nse.history_calls(), 2);
}

#[tokio::test]
async fn sequential_waits_for_each_step() {
    let chain = Chain::new();
    chain
        .nse
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(3, 222)))
        .await;
    chain
        .trailing
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(3, 444)))
        .await;
    let dalal = chain
        .builder()
        .fetch_strategy(FetchStrategy::PriorityWithFallback)
        .build()
        .unwrap();

    let (start, end) = jan();
    let series = dalal.price_history(&sym(RELIANCE), start, end).await.unwrap();
    assert_eq!(series.connector, "nse-archive");
    assert_eq!(chain.history_calls(), [1, 1, 0, 0]);
}
