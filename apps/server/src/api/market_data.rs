use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tickergate_market_data::{
    MarketDataError, MarketDataProvider, NewsItem, PriceHistory, SearchResult,
    DEFAULT_INTERVAL, DEFAULT_PERIOD, DEFAULT_RESULT_COUNT,
};

use super::extract::{ApiPath, ApiQuery};
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

fn default_count() -> i64 {
    DEFAULT_RESULT_COUNT
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

fn default_interval() -> String {
    DEFAULT_INTERVAL.to_string()
}

#[derive(Deserialize)]
struct NewsQuery {
    #[serde(default = "default_count")]
    count: i64,
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
    #[serde(default = "default_count")]
    count: i64,
}

#[derive(Deserialize)]
struct PriceHistoryQuery {
    #[serde(default = "default_period")]
    period: String,
    #[serde(default = "default_interval")]
    interval: String,
}

/// The provider hands ticker info back as JSON text; decode it so the
/// response carries one JSON value instead of a quoted string.
async fn fetch_ticker_info(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> Result<Value, MarketDataError> {
    let info_json = provider.ticker_info(symbol).await?;
    Ok(serde_json::from_str(&info_json)?)
}

async fn get_ticker_info(
    State(state): State<Arc<AppState>>,
    ApiPath(symbol): ApiPath<String>,
) -> ApiResult<Json<Value>> {
    let info = fetch_ticker_info(state.provider.as_ref(), &symbol)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching info for {}: {}", symbol, e);
            ApiError::from(e)
        })?;
    Ok(Json(info))
}

async fn get_ticker_news(
    State(state): State<Arc<AppState>>,
    ApiPath(symbol): ApiPath<String>,
    ApiQuery(q): ApiQuery<NewsQuery>,
) -> ApiResult<Json<Vec<NewsItem>>> {
    let news = state
        .provider
        .ticker_news(&symbol, q.count)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching news for {}: {}", symbol, e);
            ApiError::from(e)
        })?;
    Ok(Json(news))
}

async fn search(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<SearchQuery>,
) -> ApiResult<Json<Vec<SearchResult>>> {
    let results = state
        .provider
        .search(&q.q, q.count)
        .await
        .map_err(|e| {
            tracing::error!("Error searching for {}: {}", q.q, e);
            ApiError::from(e)
        })?;
    Ok(Json(results))
}

async fn get_price_history(
    State(state): State<Arc<AppState>>,
    ApiPath(symbol): ApiPath<String>,
    ApiQuery(q): ApiQuery<PriceHistoryQuery>,
) -> ApiResult<Json<PriceHistory>> {
    let history = state
        .provider
        .price_history(&symbol, &q.period, &q.interval)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching price history for {}: {}", symbol, e);
            ApiError::from(e)
        })?;
    Ok(Json(history))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ticker/{symbol}", get(get_ticker_info))
        .route("/news/{symbol}", get(get_ticker_news))
        .route("/search", get(search))
        .route("/price-history/{symbol}", get(get_price_history))
}
