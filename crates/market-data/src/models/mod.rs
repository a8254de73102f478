//! Market data models
//!
//! This module contains the data types returned by providers:
//! - `news` - News articles (NewsItem)
//! - `search` - Search result data (SearchResult)
//! - `history` - Historical price series (PriceHistory, PriceBar)

mod history;
mod news;
mod search;

pub use history::{PriceBar, PriceHistory, DEFAULT_INTERVAL, DEFAULT_PERIOD};
pub use news::NewsItem;
pub use search::SearchResult;

/// Number of news items or search results returned when the caller does not say.
pub const DEFAULT_RESULT_COUNT: i64 = 10;
