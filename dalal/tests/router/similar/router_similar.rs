use std::collections::HashSet;
use std::sync::Arc;

use dalal::{Capability, Dalal, LatestPrice};
use dalal_mock::DynamicMockConnector;

use crate::helpers::{MockBehavior, MockConnector, RELIANCE, sym};

#[tokio::test]
async fn samples_distinct_peers_excluding_the_symbol() {
    let dalal = Dalal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let out = dalal.similar_stocks(&sym(RELIANCE)).await;
    assert_eq!(out.sector, "Energy");
    assert!(out.error.is_none());
    assert_eq!(out.similar.len(), 5);

    let peers: HashSet<&str> = out.similar.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(peers.len(), 5);
    assert!(!peers.contains(RELIANCE));

    for s in &out.similar {
        match s.symbol.as_str() {
            "TCS" | "INFY" | "M&M" => assert!(matches!(s.price, LatestPrice::Price(_))),
            _ => assert_eq!(s.price, LatestPrice::NotAvailable),
        }
    }
}

#[tokio::test]
async fn sample_size_is_configurable() {
    let dalal = Dalal::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .similar_sample_size(2)
        .build()
        .unwrap();
    assert_eq!(dalal.similar_stocks(&sym("TCS")).await.similar.len(), 2);
}

#[tokio::test]
async fn failure_degrades_and_is_not_cached() {
    let c = DynamicMockConnector::new_with_capabilities(
        "meta",
        &[Capability::Info, Capability::Symbols],
    );
    c.set_symbols_behavior(MockBehavior::Return(vec!["TCS".into()]))
        .await;
    let dalal = Dalal::builder().with_connector(c.clone()).build().unwrap();

    let out = dalal.similar_stocks(&sym(RELIANCE)).await;
    assert_eq!(out.sector, "");
    assert!(out.similar.is_empty());
    assert!(out.error.as_deref().is_some_and(|e| e.contains("info for RELIANCE")));

    dalal.similar_stocks(&sym(RELIANCE)).await;
    assert_eq!(c.info_calls(), 2);
}

#[tokio::test]
async fn success_is_cached() {
    let c = DynamicMockConnector::new_with_capabilities(
        "meta",
        &[Capability::Info, Capability::Symbols, Capability::Quote],
    );
    c.set_info_behavior(RELIANCE, MockBehavior::Return(dalal::SymbolInfo::default()))
        .await;
    c.set_symbols_behavior(MockBehavior::Return(vec!["TCS".into(), RELIANCE.into()]))
        .await;
    let dalal = Dalal::builder().with_connector(c.clone()).build().unwrap();

    let a = dalal.similar_stocks(&sym(RELIANCE)).await;
    let b = dalal.similar_stocks(&sym(RELIANCE)).await;
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.similar.len(), 1);
    assert_eq!(a.similar[0].symbol, "TCS");
    assert_eq!(a.similar[0].price, LatestPrice::NotAvailable);
    assert_eq!(c.info_calls(), 1);
}
