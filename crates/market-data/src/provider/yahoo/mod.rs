//! Yahoo Finance market data provider.
//!
//! This provider uses the Yahoo Finance API to serve:
//! - Ticker information (quoteSummary, crumb authenticated)
//! - Ticker news (search endpoint, news section)
//! - Symbol search (search endpoint, quotes section)
//! - Historical price series (chart endpoint)

mod models;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use reqwest::{header, StatusCode};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{NewsItem, PriceBar, PriceHistory, SearchResult};
use crate::provider::MarketDataProvider;

use models::{
    YahooNewsItem, YahooQuoteSummaryResponse, YahooSearchQuote, YahooSearchResponse,
    YahooThumbnail,
};

const PROVIDER_ID: &str = "YAHOO";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";

/// quoteSummary modules merged into the ticker info payload
const TICKER_INFO_MODULES: &str =
    "price,summaryProfile,summaryDetail,defaultKeyStatistics,financialData";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("Failed to initialize Yahoo connector: {}", e),
            )
        })?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            connector,
            client,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to get cookie: {}", e))
            })?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::provider(PROVIDER_ID, "Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to get crumb: {}", e))
            })?
            .text()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to read crumb: {}", e))
            })?;

        let crumb_data = CrumbData { cookie, crumb };
        *self.crumb.write().await = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    // ========================================================================
    // Raw Endpoints
    // ========================================================================

    async fn fetch_quote_summary(
        &self,
        symbol: &str,
    ) -> Result<YahooQuoteSummaryResponse, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "{}/{}?modules={}&crumb={}",
            QUOTE_SUMMARY_URL,
            encode(symbol),
            TICKER_INFO_MODULES,
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(request_error)?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                self.clear_crumb().await;
                Err(MarketDataError::provider(
                    PROVIDER_ID,
                    "Yahoo authentication expired",
                ))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            }),
            // Unknown symbols come back as 404 with an error object in the body
            _ => response.json().await.map_err(|e| MarketDataError::InvalidResponse {
                message: format!("Failed to parse quoteSummary response: {}", e),
            }),
        }
    }

    /// Query the search endpoint, asking for the given number of quotes and news items.
    async fn fetch_search(
        &self,
        query: &str,
        quotes_count: usize,
        news_count: usize,
    ) -> Result<YahooSearchResponse, MarketDataError> {
        let url = format!(
            "{}?q={}&quotesCount={}&newsCount={}",
            SEARCH_URL,
            encode(query),
            quotes_count,
            news_count
        );

        let response = self.client.get(&url).send().await.map_err(request_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("Search request failed with status {}", status),
            ));
        }

        response.json().await.map_err(|e| MarketDataError::InvalidResponse {
            message: format!("Failed to parse search response: {}", e),
        })
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn ticker_info(&self, symbol: &str) -> Result<String, MarketDataError> {
        debug!("Fetching ticker info for {} from Yahoo", symbol);

        let response = self.fetch_quote_summary(symbol).await?;
        ticker_info_json(symbol, response)
    }

    async fn ticker_news(
        &self,
        symbol: &str,
        count: i64,
    ) -> Result<Vec<NewsItem>, MarketDataError> {
        debug!("Fetching {} news items for {} from Yahoo", count, symbol);

        let limit = page_size(count);
        let response = self.fetch_search(symbol, 0, limit).await?;
        Ok(response
            .news
            .into_iter()
            .take(limit)
            .map(to_news_item)
            .collect())
    }

    async fn search(&self, query: &str, count: i64) -> Result<Vec<SearchResult>, MarketDataError> {
        debug!("Searching Yahoo for '{}' ({} results)", query, count);

        let limit = page_size(count);
        let response = self.fetch_search(query, limit, 0).await?;
        Ok(response
            .quotes
            .into_iter()
            .filter(|quote| !quote.symbol.is_empty())
            .take(limit)
            .map(to_search_result)
            .collect())
    }

    async fn price_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceHistory, MarketDataError> {
        debug!(
            "Fetching {} price history for {} at {} from Yahoo",
            period, symbol, interval
        );

        let response = self
            .connector
            .get_quote_range(symbol, interval, period)
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::provider(PROVIDER_ID, e.to_string())
                }
            })?;

        let yahoo_quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No price history returned for '{}' ({} / {})",
                    symbol, period, interval
                );
                Vec::new()
            }
            Err(e) => return Err(MarketDataError::provider(PROVIDER_ID, e.to_string())),
        };

        let bars = yahoo_quotes
            .into_iter()
            .filter_map(|q| {
                match price_bar(
                    q.timestamp as i64,
                    q.open,
                    q.high,
                    q.low,
                    q.close,
                    q.adjclose,
                    q.volume,
                ) {
                    Ok(bar) => Some(bar),
                    Err(e) => {
                        warn!("Skipping bar due to conversion error: {}", e);
                        None
                    }
                }
            })
            .collect();

        Ok(PriceHistory::new(symbol, period, interval, bars))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn request_error(e: reqwest::Error) -> MarketDataError {
    if e.is_timeout() {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::Network(e)
    }
}

/// Pick the first quoteSummary result and hand it back as JSON text.
fn ticker_info_json(
    symbol: &str,
    response: YahooQuoteSummaryResponse,
) -> Result<String, MarketDataError> {
    let summary = response.quote_summary;

    if let Some(error) = summary.error {
        if error.code.eq_ignore_ascii_case("Not Found") {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        return Err(MarketDataError::provider(
            PROVIDER_ID,
            error.description.unwrap_or(error.code),
        ));
    }

    let result = summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    Ok(serde_json::to_string(&result)?)
}

/// Yahoo has no negative page size; anything below zero asks for nothing.
fn page_size(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}

fn to_search_result(quote: YahooSearchQuote) -> SearchResult {
    let name = quote
        .long_name
        .filter(|n| !n.is_empty())
        .or(quote.short_name)
        .unwrap_or_default();
    let result = SearchResult::new(quote.symbol, name, quote.exchange, quote.quote_type);
    match quote.score {
        Some(score) => result.with_score(score),
        None => result,
    }
}

fn to_news_item(item: YahooNewsItem) -> NewsItem {
    NewsItem {
        published_at: item
            .provider_publish_time
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        thumbnail_url: item.thumbnail.as_ref().and_then(best_thumbnail),
        uuid: item.uuid,
        title: item.title,
        publisher: item.publisher,
        link: item.link,
        kind: item.kind,
        related_tickers: item.related_tickers,
    }
}

/// Prefer the original-size image, else the widest resolution.
fn best_thumbnail(thumbnail: &YahooThumbnail) -> Option<String> {
    thumbnail
        .resolutions
        .iter()
        .find(|r| r.tag.as_deref() == Some("original"))
        .or_else(|| {
            thumbnail
                .resolutions
                .iter()
                .max_by_key(|r| u64::from(r.width.unwrap_or(0)) * u64::from(r.height.unwrap_or(0)))
        })
        .map(|r| r.url.clone())
}

/// Convert one raw chart row into a [`PriceBar`].
fn price_bar(
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    adjclose: f64,
    volume: u64,
) -> Result<PriceBar, MarketDataError> {
    // Validate timestamp
    let timestamp: DateTime<Utc> = Utc.timestamp_opt(timestamp, 0).single().ok_or_else(|| {
        MarketDataError::InvalidResponse {
            message: format!("Invalid timestamp: {}", timestamp),
        }
    })?;

    // Close price is required
    let close = Decimal::from_f64_retain(close).ok_or_else(|| MarketDataError::InvalidResponse {
        message: format!("Failed to convert close price {} to Decimal", close),
    })?;

    Ok(PriceBar {
        timestamp,
        open: Decimal::from_f64_retain(open),
        high: Decimal::from_f64_retain(high),
        low: Decimal::from_f64_retain(low),
        close,
        adj_close: Decimal::from_f64_retain(adjclose),
        volume: Decimal::from_u64(volume),
    })
}

// ============================================================================
// Tests
// ============================================================================
