//! Upstream backend implementations
//!
//! This module provides trait-based abstractions for the services the proxy
//! talks to. The resolver and the HTTP handlers only see these traits, so
//! tests can substitute in-process fakes.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProxyResult;
use crate::proxy::SearchKind;
use crate::types::{PageSummary, SearchCandidate};

pub mod search_api;
pub mod wikipedia;

/// Trait for encyclopedia backends (page search + page summary)
#[async_trait]
pub trait EncyclopediaBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Ranked title/description search.
    ///
    /// Fails with `ProxyError::UpstreamSearch`.
    async fn search_pages(
        &self,
        query: &str,
        lang: &str,
        limit: usize,
    ) -> ProxyResult<Vec<SearchCandidate>>;

    /// Full summary for one page key.
    ///
    /// Fails with `ProxyError::UpstreamSummary`.
    async fn page_summary(&self, key: &str, lang: &str) -> ProxyResult<PageSummary>;

    /// Page URL built from the key, used when a summary has no canonical URL
    fn page_url(&self, key: &str, lang: &str) -> String;
}

/// Trait for the aggregation search API
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Forward already-filtered parameters and return the upstream JSON unmodified
    async fn search(&self, kind: SearchKind, params: &[(String, String)]) -> ProxyResult<Value>;

    /// Check if this backend is configured and available
    fn is_available(&self) -> bool;
}

/// Trait for query suggestion lookup
///
/// Never fails: any upstream problem yields an empty list.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, query: &str) -> Vec<String>;
}
