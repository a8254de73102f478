//! Tickergate Market Data Crate
//!
//! This crate defines the provider interface the gateway delegates to,
//! the models providers return, and a Yahoo Finance implementation.
//!
//! # Core Types
//!
//! - [`MarketDataProvider`] - Async lookups for ticker info, news, search and price history
//! - [`NewsItem`] - A news article
//! - [`SearchResult`] - A symbol search hit
//! - [`PriceHistory`] / [`PriceBar`] - A historical OHLCV series
//! - [`MarketDataError`] - Failure of any provider operation

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{
    NewsItem, PriceBar, PriceHistory, SearchResult, DEFAULT_INTERVAL, DEFAULT_PERIOD,
    DEFAULT_RESULT_COUNT,
};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
