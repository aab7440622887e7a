//! Aggregation search API backend
//!
//! Implements [`SearchProvider`] and [`SuggestionProvider`] against a
//! bearer-authenticated search API exposing `/res/v1/<kind>/search`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{SearchProvider, SuggestionProvider};
use crate::config::{HttpConfig, SearchApiConfig};
use crate::error::{ProxyError, ProxyResult};
use crate::http::build_client;
use crate::proxy::SearchKind;

const USER_AGENT: &str = concat!("search-proxy/", env!("CARGO_PKG_VERSION"));

/// Search API backend
pub struct SearchApiBackend {
    client: Client,
    config: SearchApiConfig,
}

// Suggestion API response types
#[derive(Debug, Deserialize)]
struct SuggestResponse {
    #[serde(default)]
    results: Option<Vec<SuggestResult>>,
}

#[derive(Debug, Deserialize)]
struct SuggestResult {
    #[serde(default)]
    query: Option<String>,
}

impl SearchApiBackend {
    pub fn new(config: SearchApiConfig, http: &HttpConfig) -> ProxyResult<Self> {
        let client = build_client(http, USER_AGENT)?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, segment: &str) -> String {
        format!(
            "{}/res/v1/{}/search",
            self.config.base_url.trim_end_matches('/'),
            segment
        )
    }

    fn api_key(&self) -> ProxyResult<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProxyError::MissingApiKey)
    }

    async fn fetch_suggestions(&self, query: &str) -> ProxyResult<Vec<String>> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(self.endpoint("suggest"))
            .query(&[("q", query)])
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| ProxyError::search(None, format!("Suggest error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::search(
                Some(status.as_u16()),
                format!("Suggest API failed: {}", status.as_u16()),
            ));
        }

        let body: SuggestResponse = response
            .json()
            .await
            .map_err(|e| ProxyError::search(None, format!("Suggest decode error: {e}")))?;

        Ok(body
            .results
            .unwrap_or_default()
            .into_iter()
            .filter_map(|r| r.query)
            .collect())
    }
}

#[async_trait]
impl SearchProvider for SearchApiBackend {
    fn name(&self) -> &str {
        "search-api"
    }

    fn is_available(&self) -> bool {
        self.api_key().is_ok()
    }

    #[instrument(skip(self, params), fields(kind = kind.path_segment()))]
    async fn search(&self, kind: SearchKind, params: &[(String, String)]) -> ProxyResult<Value> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(self.endpoint(kind.path_segment()))
            .query(params)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| ProxyError::search(None, format!("{} search error: {e}", kind.label())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::search(
                Some(status.as_u16()),
                format!("{} API failed: {}", kind.label(), status.as_u16()),
            ));
        }

        response.json().await.map_err(|e| {
            ProxyError::search(None, format!("{} search error: {e}", kind.label()))
        })
    }
}

#[async_trait]
impl SuggestionProvider for SearchApiBackend {
    async fn suggest(&self, query: &str) -> Vec<String> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.fetch_suggestions(query).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                debug!(error = %e, "Suggestion lookup failed, returning none");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(api_key: Option<&str>) -> SearchApiBackend {
        let config = SearchApiConfig {
            base_url: "https://search.example.com/".to_string(),
            api_key: api_key.map(str::to_string),
        };
        SearchApiBackend::new(config, &HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_endpoint_per_kind() {
        let b = backend(Some("k"));
        assert_eq!(
            b.endpoint(SearchKind::Images.path_segment()),
            "https://search.example.com/res/v1/images/search"
        );
        assert_eq!(
            b.endpoint("suggest"),
            "https://search.example.com/res/v1/suggest/search"
        );
    }

    #[test]
    fn test_availability_follows_api_key() {
        assert!(backend(Some("k")).is_available());
        assert!(!backend(None).is_available());
        assert!(!backend(Some("")).is_available());
    }

    #[tokio::test]
    async fn test_search_without_key_fails_before_request() {
        let err = backend(None)
            .search(SearchKind::Web, &[("q".into(), "rust".into())])
            .await
            .unwrap_err();
        assert!(matches!(err, ProxyError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_suggest_without_key_is_empty() {
        assert!(backend(None).suggest("rust").await.is_empty());
    }

    #[tokio::test]
    async fn test_suggest_blank_query_is_empty() {
        assert!(backend(Some("k")).suggest("  ").await.is_empty());
    }
}
