use dalal::{DalalError, WindowAdjust};
use dalal_core::RawBar;

use crate::helpers::{Chain, MockBehavior, RELIANCE, bars, d, jan, sym};

#[tokio::test]
async fn usable_primary_short_circuits_the_chain() {
    let chain = Chain::new();
    chain
        .primary
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(21, 100)))
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    let series = dalal.price_history(&sym(RELIANCE), start, end).await.unwrap();

    assert_eq!(series.connector, "yahoo-chart");
    assert_eq!(series.len(), 21);
    assert_eq!(chain.history_calls(), [1, 0, 0, 0]);
}

#[tokio::test]
async fn empty_and_failed_steps_fall_through_in_order() {
    let chain = Chain::new();
    chain
        .primary
        .set_history_behavior(
            RELIANCE,
            MockBehavior::Fail(DalalError::transient("yahoo-chart", "unexpected status 500")),
        )
        .await;
    // nse-archive is unscripted and answers Empty on both of its steps.
    chain
        .download
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(5, 42)))
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    let series = dalal.price_history(&sym(RELIANCE), start, end).await.unwrap();

    assert_eq!(series.connector, "yahoo-download");
    assert_eq!(chain.history_calls(), [1, 2, 1, 0]);
}

#[tokio::test]
async fn widened_step_moves_only_the_start() {
    let chain = Chain::new();
    chain
        .trailing
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(3, 7)))
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    dalal.price_history(&sym(RELIANCE), start, end).await.unwrap();

    let windows = chain.nse.history_windows().await;
    assert_eq!(windows.len(), 2);
    assert_eq!((windows[0].start(), windows[0].end()), (start, end));
    assert_eq!((windows[1].start(), windows[1].end()), (d(2023, 12, 2), end));
    assert_eq!(dalal.chain()[2], ("nse-archive", WindowAdjust::WidenStart { days: 30 }));
}

#[tokio::test]
async fn rows_without_complete_prices_are_not_usable() {
    let chain = Chain::new();
    let partial = vec![RawBar {
        date: Some(d(2024, 1, 2)),
        close: Some(100.into()),
        ..RawBar::default()
    }];
    chain
        .primary
        .set_history_behavior(RELIANCE, MockBehavior::Return(partial))
        .await;
    chain
        .nse
        .set_history_behavior(RELIANCE, MockBehavior::Return(bars(2, 100)))
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    let series = dalal.price_history(&sym(RELIANCE), start, end).await.unwrap();
    assert_eq!(series.connector, "nse-archive");
    assert_eq!(chain.history_calls(), [1, 1, 0, 0]);
}

#[tokio::test]
async fn incomplete_rows_of_the_winner_are_dropped() {
    let chain = Chain::new();
    let mut rows = bars(4, 100);
    rows[1].high = None;
    chain
        .primary
        .set_history_behavior(RELIANCE, MockBehavior::Return(rows))
        .await;
    let dalal = chain.dalal();

    let (start, end) = jan();
    let series = dalal.price_history(&sym(RELIANCE), start, end).await.unwrap();
    assert_eq!(series.len(), 3);
    assert!(series.bars.windows(2).all(|w| w[0].date < w[1].date));
}
