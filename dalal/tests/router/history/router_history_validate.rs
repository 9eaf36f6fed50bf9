use dalal::DalalError;
use dalal_core::RawBar;

use crate::helpers::{Chain, MockBehavior, RELIANCE, bars, jan, sym};

#[tokio::test]
async fn priced_row_without_date_is_malformed_and_not_retried() {
    let chain = Chain::new();
    let mut rows = bars(3, 100);
    rows.push(RawBar {
        date: None,
        ..rows[0].clone()
    });
    chain
        .primary
        .set_history_behavior(RELIANCE, MockBehavior::Return(rows))
        .await;
    chain
        .nse
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(3, 100)))
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    let err = dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap_err();

    assert_eq!(err, DalalError::malformed("yahoo-chart", "Date"));
    assert_eq!(chain.history_calls(), [1, 0, 0, 0]);
}

#[tokio::test]
async fn reversed_and_future_dates_are_normalized_before_dispatch() {
    let chain = Chain::new();
    chain
        .primary
        .set_default_history(MockBehavior::Return(bars(2, 100)))
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    dalal.price_history(&sym(RELIANCE), end, start).await.unwrap();
    let far = crate::helpers::d(2999, 1, 1);
    dalal.price_history(&sym(RELIANCE), start, far).await.unwrap();

    let windows = chain.primary.history_windows().await;
    assert_eq!((windows[0].start(), windows[0].end()), (start, end));
    assert_eq!(windows[1].start(), start);
    assert!(windows[1].end() <= chrono::Utc::now().date_naive());
}
