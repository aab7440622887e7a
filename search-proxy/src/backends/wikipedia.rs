//! Wikipedia backend
//!
//! Implements [`EncyclopediaBackend`] with the MediaWiki core REST search
//! endpoint and the REST summary endpoint.
//! See: https://www.mediawiki.org/wiki/API:REST_API/Reference

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::EncyclopediaBackend;
use crate::config::{HttpConfig, WikiConfig};
use crate::error::{ProxyError, ProxyResult};
use crate::http::build_client;
use crate::types::{PageSearchResponse, PageSummary, SearchCandidate};

/// Wikipedia backend
pub struct WikipediaBackend {
    client: Client,
    config: WikiConfig,
}

impl WikipediaBackend {
    pub fn new(config: WikiConfig, http: &HttpConfig) -> ProxyResult<Self> {
        let client = build_client(http, &config.user_agent)?;
        Ok(Self { client, config })
    }

    /// Base URL for `lang` with `segments` appended, each percent-encoded
    fn endpoint(&self, lang: &str, segments: &[&str]) -> ProxyResult<Url> {
        let base = self.config.base_url_for(lang);
        let mut url = Url::parse(&base)
            .map_err(|e| ProxyError::Config(format!("invalid wiki base URL '{}': {}", base, e)))?;

        url.path_segments_mut()
            .map_err(|_| ProxyError::Config(format!("wiki base URL '{}' cannot be a base", base)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn search_url(&self, lang: &str) -> ProxyResult<Url> {
        self.endpoint(lang, &["w", "rest.php", "v1", "search", "page"])
    }

    fn summary_url(&self, key: &str, lang: &str) -> ProxyResult<Url> {
        self.endpoint(lang, &["api", "rest_v1", "page", "summary", key])
    }
}

#[async_trait]
impl EncyclopediaBackend for WikipediaBackend {
    fn name(&self) -> &str {
        "wikipedia"
    }

    #[instrument(skip(self), fields(backend = "wikipedia"))]
    async fn search_pages(
        &self,
        query: &str,
        lang: &str,
        limit: usize,
    ) -> ProxyResult<Vec<SearchCandidate>> {
        let url = self.search_url(lang)?;
        let limit = limit.to_string();

        let response = self
            .client
            .get(url)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| {
                ProxyError::search(e.status().map(|s| s.as_u16()), format!("Failed to search Wikipedia: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::search(
                Some(status.as_u16()),
                "Failed to search Wikipedia",
            ));
        }

        let body: PageSearchResponse = response.json().await.map_err(|e| {
            ProxyError::search(None, format!("Failed to decode Wikipedia search response: {e}"))
        })?;

        debug!(candidates = body.pages.len(), "page search complete");
        Ok(body.pages)
    }

    #[instrument(skip(self), fields(backend = "wikipedia"))]
    async fn page_summary(&self, key: &str, lang: &str) -> ProxyResult<PageSummary> {
        let url = self.summary_url(key, lang)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            ProxyError::summary(
                e.status().map(|s| s.as_u16()),
                format!("Failed to fetch Wikipedia summary: {e}"),
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::summary(
                Some(status.as_u16()),
                "Failed to fetch Wikipedia summary",
            ));
        }

        response.json().await.map_err(|e| {
            ProxyError::summary(None, format!("Failed to decode Wikipedia summary: {e}"))
        })
    }

    fn page_url(&self, key: &str, lang: &str) -> String {
        format!("{}/wiki/{}", self.config.base_url_for(lang), key)
    }
}
