use std::sync::Arc;

use dalal::{Capability, Dalal, DalalError, NewsItem};
use dalal_mock::DynamicMockConnector;

use crate::helpers::{MockBehavior, MockConnector, RELIANCE, TCS, sym};

#[tokio::test]
async fn news_is_truncated_to_the_limit() {
    let dalal = Dalal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .news_limit(2)
        .build()
        .unwrap();

    let feed = dalal.news(&sym(RELIANCE)).await;
    assert_eq!(feed.news.len(), 2);
    assert!(feed.error.is_none());
}

#[tokio::test]
async fn failure_degrades_to_error_payload() {
    let dalal = Dalal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let feed = dalal.news(&sym("FAIL")).await;
    assert!(feed.news.is_empty());
    let v = serde_json::to_value(&*feed).unwrap();
    assert_eq!(v["news"], serde_json::json!([]));
    assert!(v["error"].is_string());
}

#[tokio::test]
async fn only_successful_feeds_are_cached() {
    let c = DynamicMockConnector::new_with_capabilities("moneycontrol", &[Capability::News]);
    c.set_news_behavior(
        TCS,
        MockBehavior::Return(vec![NewsItem {
            title: "TCS wins large European deal".into(),
            link: "https://example.com/tcs".into(),
            date: "January 10, 2024".into(),
        }]),
    )
    .await;
    c.set_news_behavior(
        RELIANCE,
        MockBehavior::Fail(DalalError::transient("moneycontrol", "unexpected status 503")),
    )
    .await;
    let dalal = Dalal::builder().with_connector(c.clone()).build().unwrap();

    dalal.news(&sym(TCS)).await;
    dalal.news(&sym(TCS)).await;
    dalal.news(&sym(RELIANCE)).await;
    dalal.news(&sym(RELIANCE)).await;
    assert_eq!(c.news_calls(), 3);
}
