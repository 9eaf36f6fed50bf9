use dalal_core::{Capability, Symbol, SymbolInfo};
use rust_decimal::Decimal;

use crate::Dalal;
use crate::dalal_router_method;

impl Dalal {
    dalal_router_method! {
        /// Company metadata from the first connector that answers.
        ///
        /// `stock_data` does not use this; it asks only the connector that won
        /// the history chain.
        method: info(symbol: &Symbol) -> SymbolInfo,
        accessor: as_info_provider,
        capability: Capability::Info,
        what: "info",
        call: info(symbol)
    }

    dalal_router_method! {
        /// Latest close from the first connector that answers.
        method: latest_close(symbol: &Symbol) -> Decimal,
        accessor: as_quote_provider,
        capability: Capability::Quote,
        what: "latest close",
        call: latest_close(symbol)
    }

    dalal_router_method! {
        /// Up to `limit` headlines from the first connector that answers.
        method: headlines(symbol: &Symbol, limit: usize) -> Vec<dalal_core::NewsItem>,
        accessor: as_news_provider,
        capability: Capability::News,
        what: "news",
        call: news(symbol, limit)
    }
}
