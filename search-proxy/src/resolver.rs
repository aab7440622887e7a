//! Encyclopedia summary resolver
//!
//! Picks the single best non-ambiguous article for a free-text query.
//!
//! Candidates from the page search are pre-filtered with cheap title and
//! description heuristics. The first survivor's summary is fetched, and if
//! the summary service itself flags it as a disambiguation page, the
//! remaining survivors are tried one at a time until one is not. Only the
//! initial search and the primary summary fetch can fail the call; errors
//! during the fallback scan just move on to the next candidate.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::backends::EncyclopediaBackend;
use crate::error::{ProxyError, ProxyResult};
use crate::types::{PageSummary, ResolvedSummary, SearchCandidate};

/// Language used when the caller does not supply one
pub const DEFAULT_LANG: &str = "en";

/// Number of ranked candidates requested by default
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

const MAX_LANG_LEN: usize = 20;

/// Heuristic pre-filter: false for candidates that look like disambiguation
/// or list pages.
pub fn is_plausible(candidate: &SearchCandidate) -> bool {
    if candidate.title.to_lowercase().contains("disambiguation") {
        return false;
    }

    let description = candidate
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    !(description.contains("disambiguation") || description.contains("list of"))
}

/// Language codes end up in the upstream host name
pub fn validate_lang(lang: &str) -> ProxyResult<()> {
    let valid = !lang.is_empty()
        && lang.len() <= MAX_LANG_LEN
        && lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(ProxyError::InvalidInput(format!(
            "invalid language code '{}'",
            lang
        )))
    }
}

/// Resolves a query to one normalized summary
#[derive(Clone)]
pub struct Resolver {
    backend: Arc<dyn EncyclopediaBackend>,
    search_limit: usize,
}

impl Resolver {
    pub fn new(backend: Arc<dyn EncyclopediaBackend>, search_limit: usize) -> Self {
        Self {
            backend,
            search_limit: search_limit.max(1),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Resolve `query` in `lang`.
    ///
    /// Returns `Ok(None)` when there are no candidates, when every candidate
    /// is filtered out, or when the fallback scan is exhausted.
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn resolve(&self, query: &str, lang: &str) -> ProxyResult<Option<ResolvedSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ProxyError::InvalidInput("Query is required".to_string()));
        }
        validate_lang(lang)?;

        let candidates = self
            .backend
            .search_pages(query, lang, self.search_limit)
            .await?;

        if candidates.is_empty() {
            debug!("no candidates returned");
            return Ok(None);
        }

        let Some(primary_pos) = candidates.iter().position(is_plausible) else {
            debug!(
                candidates = candidates.len(),
                "every candidate looks like a disambiguation or list page"
            );
            return Ok(None);
        };
        let primary = &candidates[primary_pos];
        debug!(key = %primary.key, rank = primary_pos, "primary pick");

        let summary = self.backend.page_summary(&primary.key, lang).await?;
        if !summary.is_disambiguation() {
            return Ok(Some(self.normalize(summary, &primary.key, lang)));
        }

        debug!(key = %primary.key, "primary summary is a disambiguation page, scanning fallbacks");

        let fallbacks = candidates[primary_pos + 1..]
            .iter()
            .filter(|c| c.key != primary.key && is_plausible(c));

        for candidate in fallbacks {
            match self.backend.page_summary(&candidate.key, lang).await {
                Ok(summary) if !summary.is_disambiguation() => {
                    debug!(key = %candidate.key, "fallback accepted");
                    return Ok(Some(self.normalize(summary, &candidate.key, lang)));
                }
                Ok(_) => {
                    debug!(key = %candidate.key, "fallback is also a disambiguation page");
                }
                Err(e) => {
                    warn!(key = %candidate.key, error = %e, "fallback summary fetch failed, skipping");
                }
            }
        }

        debug!("fallback candidates exhausted");
        Ok(None)
    }

    /// [`resolve`](Self::resolve) bounded by one deadline across all of its
    /// upstream requests. Dropping the future cancels any request in flight.
    pub async fn resolve_within(
        &self,
        query: &str,
        lang: &str,
        deadline: Duration,
    ) -> ProxyResult<Option<ResolvedSummary>> {
        tokio::time::timeout(deadline, self.resolve(query, lang))
            .await
            .map_err(|_| ProxyError::UpstreamTimeout(deadline))?
    }

    fn normalize(&self, summary: PageSummary, key: &str, lang: &str) -> ResolvedSummary {
        ResolvedSummary::from_summary(summary, || self.backend.page_url(key, lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-process backend that records every call
    #[derive(Default)]
    struct FakeBackend {
        candidates: Vec<SearchCandidate>,
        search_status: Option<u16>,
        summaries: HashMap<String, Value>,
        failing: HashMap<String, u16>,
        search_calls: Mutex<usize>,
        summary_calls: Mutex<Vec<String>>,
        delay: Option<Duration>,
    }

    impl FakeBackend {
        fn with_candidates(candidates: Vec<SearchCandidate>) -> Self {
            Self {
                candidates,
                ..Default::default()
            }
        }

        fn summary(mut self, key: &str, value: Value) -> Self {
            self.summaries.insert(key.to_string(), value);
            self
        }

        fn failing_summary(mut self, key: &str, status: u16) -> Self {
            self.failing.insert(key.to_string(), status);
            self
        }

        fn summary_calls(&self) -> Vec<String> {
            self.summary_calls.lock().unwrap().clone()
        }

        fn search_calls(&self) -> usize {
            *self.search_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl EncyclopediaBackend for FakeBackend {
        fn name(&self) -> &str {
            "fake"
        }

        async fn search_pages(
            &self,
            _query: &str,
            _lang: &str,
            _limit: usize,
        ) -> ProxyResult<Vec<SearchCandidate>> {
            *self.search_calls.lock().unwrap() += 1;
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(status) = self.search_status {
                return Err(ProxyError::search(Some(status), "Failed to search Wikipedia"));
            }
            Ok(self.candidates.clone())
        }

        async fn page_summary(&self, key: &str, _lang: &str) -> ProxyResult<PageSummary> {
            self.summary_calls.lock().unwrap().push(key.to_string());
            if let Some(status) = self.failing.get(key) {
                return Err(ProxyError::summary(Some(*status), "Failed to fetch Wikipedia summary"));
            }
            let value = self
                .summaries
                .get(key)
                .cloned()
                .unwrap_or_else(|| json!({ "title": key }));
            Ok(serde_json::from_value(value).unwrap())
        }

        fn page_url(&self, key: &str, lang: &str) -> String {
            format!("https://{}.wikipedia.org/wiki/{}", lang, key)
        }
    }

    fn candidate(key: &str, title: &str, description: Option<&str>) -> SearchCandidate {
        SearchCandidate {
            key: key.to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn disambiguation(title: &str) -> Value {
        json!({ "title": title, "type": "disambiguation" })
    }

    fn resolver(backend: &Arc<FakeBackend>) -> Resolver {
        Resolver::new(backend.clone(), DEFAULT_SEARCH_LIMIT)
    }

    #[test]
    fn test_heuristic_filters() {
        assert!(!is_plausible(&candidate("a", "Mercury (disambiguation)", None)));
        assert!(!is_plausible(&candidate("a", "Mercury", Some("Topics referred to by the same term (Disambiguation)"))));
        assert!(!is_plausible(&candidate("a", "Planets", Some("List of planets"))));
        assert!(is_plausible(&candidate("a", "Mercury (planet)", Some("Smallest planet"))));
        assert!(is_plausible(&candidate("a", "Mercury (element)", None)));
    }

    #[test]
    fn test_validate_lang() {
        assert!(validate_lang("en").is_ok());
        assert!(validate_lang("zh-yue").is_ok());
        assert!(validate_lang("").is_err());
        assert!(validate_lang("evil.com/").is_err());
        assert!(validate_lang("en wiki").is_err());
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid_input_without_network() {
        let backend = Arc::new(FakeBackend::default());
        let err = resolver(&backend).resolve("   ", "en").await.unwrap_err();

        assert!(matches!(err, ProxyError::InvalidInput(_)));
        assert_eq!(backend.search_calls(), 0);
        assert!(backend.summary_calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_candidates_is_none_without_summary_fetch() {
        let backend = Arc::new(FakeBackend::with_candidates(vec![]));
        let result = resolver(&backend).resolve("xyzzy", "en").await.unwrap();

        assert!(result.is_none());
        assert_eq!(backend.search_calls(), 1);
        assert!(backend.summary_calls().is_empty());
    }

    #[tokio::test]
    async fn test_all_filtered_is_none_without_summary_fetch() {
        let backend = Arc::new(FakeBackend::with_candidates(vec![
            candidate("Mercury_(disambiguation)", "Mercury (disambiguation)", None),
            candidate("List_of_planets", "Planets", Some("List of planets in the Solar System")),
        ]));
        let result = resolver(&backend).resolve("Mercury", "en").await.unwrap();

        assert!(result.is_none());
        assert!(backend.summary_calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_propagates_status() {
        let backend = Arc::new(FakeBackend {
            search_status: Some(503),
            ..Default::default()
        });
        let err = resolver(&backend).resolve("Mercury", "en").await.unwrap_err();

        assert!(matches!(err, ProxyError::UpstreamSearch { status: Some(503), .. }));
        assert!(backend.summary_calls().is_empty());
    }

    #[tokio::test]
    async fn test_mercury_skips_disambiguation_title() {
        let backend = Arc::new(
            FakeBackend::with_candidates(vec![
                candidate("Mercury_(disambiguation)", "Mercury (disambiguation)", None),
                candidate("Mercury_(planet)", "Mercury (planet)", Some("Smallest planet")),
            ])
            .summary(
                "Mercury_(planet)",
                json!({
                    "title": "Mercury (planet)",
                    "description": "Smallest planet in the Solar System",
                    "extract": "Mercury is the first planet from the Sun.",
                    "type": "standard",
                    "content_urls": { "desktop": { "page": "https://en.wikipedia.org/wiki/Mercury_(planet)" } }
                }),
            ),
        );

        let result = resolver(&backend)
            .resolve("Mercury", "en")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(backend.summary_calls(), vec!["Mercury_(planet)"]);
        assert_eq!(result.title, "Mercury (planet)");
        assert_eq!(result.url, "https://en.wikipedia.org/wiki/Mercury_(planet)");
    }

    #[tokio::test]
    async fn test_primary_summary_failure_is_error() {
        let backend = Arc::new(
            FakeBackend::with_candidates(vec![
                candidate("Rust", "Rust", None),
                candidate("Rust_(programming_language)", "Rust (programming language)", None),
            ])
            .failing_summary("Rust", 500),
        );
        let err = resolver(&backend).resolve("rust", "en").await.unwrap_err();

        assert!(matches!(err, ProxyError::UpstreamSummary { status: Some(500), .. }));
        assert_eq!(backend.summary_calls(), vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_flagged_primary_falls_back_to_second() {
        let backend = Arc::new(
            FakeBackend::with_candidates(vec![
                candidate("Mercury", "Mercury", Some("Topics referred to by the same term")),
                candidate("Mercury_(planet)", "Mercury (planet)", None),
                candidate("Mercury_(element)", "Mercury (element)", None),
            ])
            .summary("Mercury", disambiguation("Mercury")),
        );

        let result = resolver(&backend)
            .resolve("Mercury", "en")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(backend.summary_calls(), vec!["Mercury", "Mercury_(planet)"]);
        assert_eq!(result.title, "Mercury_(planet)");
        assert_eq!(result.url, "https://en.wikipedia.org/wiki/Mercury_(planet)");
    }

    #[tokio::test]
    async fn test_fallback_skips_filtered_and_failing_candidates() {
        let backend = Arc::new(
            FakeBackend::with_candidates(vec![
                candidate("Java", "Java", None),
                candidate("Java_(disambiguation)", "Java (disambiguation)", None),
                candidate("Java_(island)", "Java (island)", None),
                candidate("Java_(programming_language)", "Java (programming language)", None),
            ])
            .summary("Java", disambiguation("Java"))
            .failing_summary("Java_(island)", 503),
        );

        let result = resolver(&backend)
            .resolve("Java", "en")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            backend.summary_calls(),
            vec!["Java", "Java_(island)", "Java_(programming_language)"]
        );
        assert_eq!(result.title, "Java_(programming_language)");
    }

    #[tokio::test]
    async fn test_exhausted_fallbacks_is_none() {
        let backend = Arc::new(
            FakeBackend::with_candidates(vec![
                candidate("A", "A", None),
                candidate("B", "B", None),
                candidate("C", "C", None),
            ])
            .summary("A", disambiguation("A"))
            .summary("B", json!({ "title": "B", "pageprops": { "disambiguation": "" } }))
            .failing_summary("C", 404),
        );

        let result = resolver(&backend).resolve("abc", "en").await.unwrap();

        assert!(result.is_none());
        assert_eq!(backend.summary_calls(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_fallback_excludes_duplicate_primary_key() {
        let backend = Arc::new(
            FakeBackend::with_candidates(vec![
                candidate("A", "A", None),
                candidate("A", "A again", None),
                candidate("B", "B", None),
            ])
            .summary("A", disambiguation("A")),
        );

        resolver(&backend).resolve("a", "en").await.unwrap();
        assert_eq!(backend.summary_calls(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_missing_fields_normalize() {
        let backend = Arc::new(
            FakeBackend::with_candidates(vec![candidate("Tide", "Tide", None)])
                .summary("Tide", json!({ "title": "Tide" })),
        );

        let result = resolver(&backend)
            .resolve("tide", "fr")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.description, "");
        assert_eq!(result.extract, "");
        assert!(result.thumbnail.is_none());
        assert_eq!(result.url, "https://fr.wikipedia.org/wiki/Tide");
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let backend = Arc::new(
            FakeBackend::with_candidates(vec![
                candidate("A", "A", None),
                candidate("B", "B", None),
            ])
            .summary("A", disambiguation("A")),
        );
        let resolver = resolver(&backend);

        let first = resolver.resolve("q", "en").await.unwrap();
        let second = resolver.resolve("q", "en").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_deadline_expiry_is_timeout() {
        let backend = Arc::new(FakeBackend {
            delay: Some(Duration::from_secs(5)),
            ..Default::default()
        });
        let err = resolver(&backend)
            .resolve_within("slow", "en", Duration::from_millis(20))
            .await
            .unwrap_err();

        assert!(matches!(err, ProxyError::UpstreamTimeout(_)));
    }
}
