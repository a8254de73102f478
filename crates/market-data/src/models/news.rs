//! News article models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article related to one or more tickers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Provider-assigned article id
    pub uuid: String,

    pub title: String,

    /// Publishing outlet (e.g., "Reuters")
    pub publisher: String,

    /// Link to the full article
    pub link: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// Article kind as reported by the provider (e.g., "STORY", "VIDEO")
    pub kind: String,

    #[serde(default)]
    pub related_tickers: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}
