//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that the
//! gateway consumes.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{NewsItem, PriceHistory, SearchResult};

/// Trait for market data providers.
///
/// Implementations must be safe to call concurrently; the gateway shares a
/// single instance across every in-flight request and never serializes
/// access to it.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tickergate_market_data::provider::MarketDataProvider;
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     // ... implement the four lookups
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging.
    fn id(&self) -> &'static str;

    /// Fetch descriptive information for a ticker.
    ///
    /// Returns the provider's payload as serialized JSON text.
    async fn ticker_info(&self, symbol: &str) -> Result<String, MarketDataError>;

    /// Fetch up to `count` recent news articles for a ticker.
    ///
    /// `count` arrives exactly as the client sent it and may be negative.
    async fn ticker_news(&self, symbol: &str, count: i64)
        -> Result<Vec<NewsItem>, MarketDataError>;

    /// Search for symbols and entities matching `query`, at most `count` results.
    async fn search(&self, query: &str, count: i64) -> Result<Vec<SearchResult>, MarketDataError>;

    /// Fetch a historical price series.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The ticker symbol
    /// * `period` - Lookback window token (e.g., "1mo", "1y", "max")
    /// * `interval` - Bar size token (e.g., "1m", "1d", "1wk")
    ///
    /// Tokens are forwarded as given; rejecting an unsupported combination
    /// is up to the provider.
    async fn price_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<PriceHistory, MarketDataError>;
}
