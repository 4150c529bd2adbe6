//! Wire types for the recommendation service

use serde::Deserialize;

/// A single recommended article.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "contentId")]
    pub content_id: i64,
    pub title: String,
}

impl Recommendation {
    /// Placeholder for legacy responses that carry only an article id.
    pub fn placeholder(content_id: i64) -> Self {
        Self {
            content_id,
            title: format!("Article {}", content_id),
        }
    }
}

/// One entry in a recommendations list. Current responses carry full objects,
/// legacy ones carry bare numeric ids.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiEntry {
    Item(Recommendation),
    RawId(i64),
}

/// Response body shapes the service has been observed to return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Wrapped { recommendations: Vec<ApiEntry> },
    Bare(Vec<ApiEntry>),
}

impl ApiResponse {
    pub fn into_entries(self) -> Vec<ApiEntry> {
        match self {
            Self::Wrapped { recommendations } => recommendations,
            Self::Bare(entries) => entries,
        }
    }
}
