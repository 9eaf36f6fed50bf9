use dalal::DalalError;

use crate::helpers::{Chain, MockBehavior, RELIANCE, jan, sym};

#[tokio::test]
async fn every_step_empty_is_data_unavailable() {
    let chain = Chain::new();
    let dalal = chain.dalal();

    let (start, end) = jan();
    let err = dalal
        .stock_data(&sym(RELIANCE), start, end)
        .await
        .unwrap_err();

    assert_eq!(err, DalalError::data_unavailable("data for RELIANCE"));
    assert_eq!(chain.history_calls(), [1, 2, 1, 1]);
}

#[tokio::test]
async fn every_step_failing_is_still_data_unavailable() {
    let chain = Chain::new();
    for c in [&chain.primary, &chain.nse, &chain.download, &chain.trailing] {
        c.set_default_history(MockBehavior::Fail(DalalError::transient(
            "upstream",
            "connection reset",
        )))
        .await;
    }
    let dalal = chain.dalal();

    let (start, end) = jan();
    let err = dalal.stock_data(&sym(RELIANCE), start, end).await.unwrap_err();
    assert!(matches!(err, DalalError::DataUnavailable { .. }), "{err:?}");
}
