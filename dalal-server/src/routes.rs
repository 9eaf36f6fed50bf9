use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::NaiveDate;
use dalal::{Dalal, DalalError, Symbol};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

type ApiResult = Result<Response, ApiError>;

/// Router with every API route, CORS open to any origin and request tracing.
pub fn app(dalal: Arc<Dalal>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/symbols", get(symbols))
        .route("/api/stock-data/:symbol", get(stock_data))
        .route("/api/batch-prices", get(batch_prices))
        .route("/api/similar-stocks/:symbol", get(similar_stocks))
        .route("/api/news/:symbol", get(news))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(dalal)
}

#[derive(Debug, Deserialize)]
struct StockDataQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchQuery {
    symbols: Option<String>,
}

fn parse_date(name: &str, raw: Option<&str>) -> Result<NaiveDate, DalalError> {
    let raw = raw.ok_or_else(|| DalalError::InvalidArg(format!("{name} is required")))?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| DalalError::InvalidArg(format!("{name} must be YYYY-MM-DD, got {raw:?}")))
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Dalal API is running!" }))
}

async fn symbols(State(dalal): State<Arc<Dalal>>) -> ApiResult {
    let list = dalal.symbols().await?;
    Ok(Json(&*list).into_response())
}

async fn stock_data(
    State(dalal): State<Arc<Dalal>>,
    Path(symbol): Path<String>,
    Query(q): Query<StockDataQuery>,
) -> ApiResult {
    let symbol = Symbol::new(&symbol)?;
    let start = parse_date("start_date", q.start_date.as_deref())?;
    let end = parse_date("end_date", q.end_date.as_deref())?;
    let data = dalal.stock_data(&symbol, start, end).await?;
    Ok(Json(&*data).into_response())
}

async fn batch_prices(State(dalal): State<Arc<Dalal>>, Query(q): Query<BatchQuery>) -> ApiResult {
    let raw = q
        .symbols
        .ok_or_else(|| DalalError::InvalidArg("symbols is required".into()))?;
    let wanted: Vec<&str> = raw.split(',').collect();
    Ok(Json(dalal.batch_prices(wanted.as_slice()).await).into_response())
}

async fn similar_stocks(State(dalal): State<Arc<Dalal>>, Path(symbol): Path<String>) -> ApiResult {
    let symbol = Symbol::new(&symbol)?;
    let payload = dalal.similar_stocks(&symbol).await;
    Ok(Json(&*payload).into_response())
}

async fn news(State(dalal): State<Arc<Dalal>>, Path(symbol): Path<String>) -> ApiResult {
    let symbol = Symbol::new(&symbol)?;
    let feed = dalal.news(&symbol).await;
    Ok(Json(&*feed).into_response())
}
