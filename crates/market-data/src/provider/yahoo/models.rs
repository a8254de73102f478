//! Yahoo Finance API response models.
//!
//! These cover the raw endpoints the provider calls directly (quoteSummary
//! and the search endpoint's quote and news sections). Chart data goes
//! through `yahoo_finance_api`.

use serde::Deserialize;

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
///
/// Yahoo sends `"result": null` together with an `error` object for
/// unknown symbols.
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    pub result: Option<Vec<serde_json::Value>>,
    pub error: Option<YahooApiError>,
}

/// Error object embedded in Yahoo responses
#[derive(Debug, Deserialize)]
pub struct YahooApiError {
    pub code: String,
    pub description: Option<String>,
}

/// Response of the v1 search endpoint.
#[derive(Debug, Deserialize)]
pub struct YahooSearchResponse {
    #[serde(default)]
    pub quotes: Vec<YahooSearchQuote>,
    #[serde(default)]
    pub news: Vec<YahooNewsItem>,
}

/// One entry of the search endpoint's `quotes` section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSearchQuote {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "shortname")]
    pub short_name: Option<String>,
    #[serde(rename = "longname")]
    pub long_name: Option<String>,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub quote_type: String,
    pub score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooNewsItem {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub link: String,
    pub provider_publish_time: Option<i64>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub related_tickers: Vec<String>,
    pub thumbnail: Option<YahooThumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct YahooThumbnail {
    #[serde(default)]
    pub resolutions: Vec<YahooThumbnailResolution>,
}

#[derive(Debug, Deserialize)]
pub struct YahooThumbnailResolution {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_quote_summary_not_found() {
        let json = r#"{
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}
            }
        }"#;
        let response: YahooQuoteSummaryResponse = serde_json::from_str(json).unwrap();
        assert!(response.quote_summary.result.is_none());
        let error = response.quote_summary.error.unwrap();
        assert_eq!(error.code, "Not Found");
        assert_eq!(
            error.description.as_deref(),
            Some("Quote not found for symbol: ZZZZ")
        );
    }

    #[test]
    fn test_deserialize_news_item() {
        let json = r#"{
            "count": 1,
            "quotes": [],
            "news": [{
                "uuid": "0f4a6b2e",
                "title": "Apple unveils new chips",
                "publisher": "Reuters",
                "link": "https://finance.yahoo.com/news/apple-unveils",
                "providerPublishTime": 1700000000,
                "type": "STORY",
                "thumbnail": {"resolutions": [
                    {"url": "https://s.yimg.com/original.jpg", "width": 1200, "height": 800, "tag": "original"}
                ]},
                "relatedTickers": ["AAPL"]
            }]
        }"#;
        let response: YahooSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.news.len(), 1);
        let item = &response.news[0];
        assert_eq!(item.kind, "STORY");
        assert_eq!(item.provider_publish_time, Some(1_700_000_000));
        assert_eq!(item.related_tickers, vec!["AAPL".to_string()]);
        assert_eq!(item.thumbnail.as_ref().unwrap().resolutions[0].width, Some(1200));
    }

    #[test]
    fn test_deserialize_search_without_news() {
        let response: YahooSearchResponse =
            serde_json::from_str(r#"{"count": 0, "quotes": []}"#).unwrap();
        assert!(response.news.is_empty());
        assert!(response.quotes.is_empty());
    }

    #[test]
    fn test_deserialize_search_quotes() {
        let json = r#"{
            "count": 2,
            "quotes": [
                {
                    "exchange": "NMS",
                    "shortname": "Apple Inc.",
                    "quoteType": "EQUITY",
                    "symbol": "AAPL",
                    "index": "quotes",
                    "score": 20017.0,
                    "typeDisp": "Equity",
                    "longname": "Apple Inc.",
                    "exchDisp": "NASDAQ",
                    "isYahooFinance": true
                },
                {
                    "exchange": "NEO",
                    "shortname": "APPLE CDR (CAD HEDGED)",
                    "quoteType": "EQUITY",
                    "symbol": "AAPL.NE",
                    "score": 20005.0
                }
            ],
            "news": []
        }"#;
        let response: YahooSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.quotes.len(), 2);

        let first = &response.quotes[0];
        assert_eq!(first.symbol, "AAPL");
        assert_eq!(first.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(first.quote_type, "EQUITY");
        assert_eq!(first.score, Some(20017.0));

        let second = &response.quotes[1];
        assert!(second.long_name.is_none());
        assert_eq!(second.short_name.as_deref(), Some("APPLE CDR (CAD HEDGED)"));
    }
}
