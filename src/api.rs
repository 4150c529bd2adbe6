//! Recommendation service client
//!
//! Thin wrapper over the external recommendation API. Every failure mode
//! (unreachable host, non-2xx status, undecodable body) is logged and
//! degraded to an empty result list; callers never see an error.

use crate::types::{ApiEntry, ApiResponse};
use tracing::{debug, error};

/// Which recommendation lane a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationKind {
    Collaborative,
    Content,
}

impl RecommendationKind {
    /// Path segment under `/api/recommendations/`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Collaborative => "collaborative",
            Self::Content => "content",
        }
    }

    /// JSON body key carrying the identifier.
    pub fn body_key(self) -> &'static str {
        match self {
            Self::Collaborative => "person_id",
            Self::Content => "item_id",
        }
    }
}

#[derive(Clone)]
pub struct RecommendationClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecommendationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the identifier to the service and return the raw entries.
    /// An empty identifier is still sent as an empty string.
    pub async fn fetch(&self, kind: RecommendationKind, identifier: &str) -> Vec<ApiEntry> {
        let url = format!("{}/api/recommendations/{}", self.base_url, kind.endpoint());
        let mut body = serde_json::Map::new();
        body.insert(
            kind.body_key().to_owned(),
            serde_json::Value::String(identifier.to_owned()),
        );

        debug!(url = %url, kind = kind.endpoint(), "Requesting recommendations");

        let response = match self.http.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, url = %url, "Failed to reach recommendation service");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            error!(status = %response.status(), url = %url, "Recommendation request rejected");
            return Vec::new();
        }

        match response.json::<ApiResponse>().await {
            Ok(parsed) => {
                let entries = parsed.into_entries();
                debug!(count = entries.len(), kind = kind.endpoint(), "Recommendations received");
                entries
            }
            Err(e) => {
                error!(error = %e, "Failed to decode recommendations response");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Recommendation;
    use httpmock::prelude::*;

    #[test]
    fn endpoint_and_body_key_per_kind() {
        assert_eq!(RecommendationKind::Collaborative.endpoint(), "collaborative");
        assert_eq!(RecommendationKind::Collaborative.body_key(), "person_id");
        assert_eq!(RecommendationKind::Content.endpoint(), "content");
        assert_eq!(RecommendationKind::Content.body_key(), "item_id");
    }

    #[tokio::test]
    async fn ok_response_returns_entries_in_order() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/recommendations/collaborative")
                .json_body(serde_json::json!({"person_id": "768"}));
            then.status(200).json_body(serde_json::json!({
                "recommendations": [
                    {"contentId": 1, "title": "First"},
                    {"contentId": 2, "title": "Second"},
                    {"contentId": 3, "title": "Third"},
                    {"contentId": 4, "title": "Fourth"},
                    {"contentId": 5, "title": "Fifth"}
                ]
            }));
        });

        let client = RecommendationClient::new(server.base_url());
        let entries = client.fetch(RecommendationKind::Collaborative, "768").await;

        mock.assert();
        let titles: Vec<&str> = entries
            .iter()
            .filter_map(|e| match e {
                ApiEntry::Item(rec) => Some(rec.title.as_str()),
                ApiEntry::RawId(_) => None,
            })
            .collect();
        assert_eq!(titles, ["First", "Second", "Third", "Fourth", "Fifth"]);
    }

    #[tokio::test]
    async fn non_2xx_returns_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/recommendations/content");
            then.status(500).body("internal error");
        });

        let client = RecommendationClient::new(server.base_url());
        let entries = client.fetch(RecommendationKind::Content, "183").await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_returns_empty() {
        let client = RecommendationClient::new("http://127.0.0.1:9");
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
        let entries = client.fetch(RecommendationKind::Collaborative, "768").await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn undecodable_body_returns_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/recommendations/content");
            then.status(200).body("not json");
        });

        let client = RecommendationClient::new(server.base_url());
        let entries = client.fetch(RecommendationKind::Content, "183").await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn legacy_id_list_is_accepted() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/recommendations/content");
            then.status(200).json_body(serde_json::json!([183, 201, 54]));
        });

        let client = RecommendationClient::new(server.base_url());
        let entries = client.fetch(RecommendationKind::Content, "183").await;
        assert_eq!(
            entries,
            vec![ApiEntry::RawId(183), ApiEntry::RawId(201), ApiEntry::RawId(54)]
        );
        assert_eq!(
            Recommendation::placeholder(183).title,
            "Article 183"
        );
    }

    #[tokio::test]
    async fn empty_identifier_is_still_sent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/recommendations/content")
                .json_body(serde_json::json!({"item_id": ""}));
            then.status(200)
                .json_body(serde_json::json!({"recommendations": []}));
        });

        let client = RecommendationClient::new(server.base_url());
        let entries = client.fetch(RecommendationKind::Content, "").await;

        mock.assert();
        assert!(entries.is_empty());
    }
}
