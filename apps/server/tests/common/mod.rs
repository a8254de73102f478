#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tickergate_market_data::{
    MarketDataError, MarketDataProvider, NewsItem, PriceHistory, SearchResult,
};
use tickergate_server::{api::app_router, config::Config, AppState};
use tower::ServiceExt;

/// A provider call as the mock saw it.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    TickerInfo(String),
    TickerNews(String, i64),
    Search(String, i64),
    PriceHistory(String, String, String),
}

/// In-memory provider that records every call.
#[derive(Default)]
pub struct MockProvider {
    pub fail: bool,
    pub ticker_text: Option<String>,
    pub delay: Duration,
    calls: Mutex<Vec<Call>>,
}

impl MockProvider {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_ticker_text(text: &str) -> Self {
        Self {
            ticker_text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn ticker_info(&self, symbol: &str) -> Result<String, MarketDataError> {
        self.record(Call::TickerInfo(symbol.to_string())).await;
        if self.fail {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        Ok(self
            .ticker_text
            .clone()
            .unwrap_or_else(|| format!(r#"{{"symbol":"{}","price":150.0}}"#, symbol)))
    }

    async fn ticker_news(
        &self,
        symbol: &str,
        count: i64,
    ) -> Result<Vec<NewsItem>, MarketDataError> {
        self.record(Call::TickerNews(symbol.to_string(), count)).await;
        if self.fail {
            return Err(MarketDataError::RateLimited {
                provider: "MOCK".to_string(),
            });
        }
        Ok(vec![NewsItem {
            uuid: "0f4a6b2e".to_string(),
            title: format!("{} beats estimates", symbol),
            publisher: "Reuters".to_string(),
            link: "https://example.com/news/1".to_string(),
            published_at: None,
            kind: "STORY".to_string(),
            related_tickers: vec![symbol.to_string()],
            thumbnail_url: None,
        }])
    }

    async fn search(
        &self,
        query: &str,
        count: i64,
    ) -> Result<Vec<SearchResult>, MarketDataError> {
        self.record(Call::Search(query.to_string(), count)).await;
        if self.fail {
            return Err(MarketDataError::provider("MOCK", "search backend unavailable"));
        }
        Ok(vec![
            SearchResult::new("AAPL", "Apple Inc.", "NMS", "EQUITY").with_score(20017.0),
        ])
    }

    async fn price_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceHistory, MarketDataError> {
        self.record(Call::PriceHistory(
            symbol.to_string(),
            period.to_string(),
            interval.to_string(),
        ))
        .await;
        if self.fail {
            return Err(MarketDataError::provider(
                "MOCK",
                format!("Invalid input - interval={} is not supported", interval),
            ));
        }
        Ok(PriceHistory::new(symbol, period, interval, Vec::new()))
    }
}

pub fn test_router(provider: Arc<MockProvider>) -> Router {
    app_router(AppState::new(provider), &Config::default())
}

/// Send a GET and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
