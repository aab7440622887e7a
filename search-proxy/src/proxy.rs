//! Parameter forwarding for the search API passthrough endpoints
//!
//! Each search kind forwards the required `q` plus a fixed allow-list of
//! optional parameters. Everything else the caller sends is dropped.

use serde_json::Value;
use std::collections::HashMap;

use crate::backends::SearchProvider;
use crate::error::{ProxyError, ProxyResult};

/// The search verticals offered by the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Web,
    Images,
    Videos,
    News,
}

impl SearchKind {
    pub const ALL: [SearchKind; 4] = [
        SearchKind::Web,
        SearchKind::Images,
        SearchKind::Videos,
        SearchKind::News,
    ];

    /// Path segment in `/res/v1/<segment>/search`
    pub fn path_segment(&self) -> &'static str {
        match self {
            SearchKind::Web => "web",
            SearchKind::Images => "images",
            SearchKind::Videos => "videos",
            SearchKind::News => "news",
        }
    }

    /// Optional parameters forwarded verbatim, in forwarding order
    pub fn allowed_params(&self) -> &'static [&'static str] {
        match self {
            SearchKind::Web => &[
                "country",
                "search_lang",
                "count",
                "offset",
                "safesearch",
                "freshness",
                "extra_snippets",
                "result_filter",
            ],
            SearchKind::Images => &["count", "offset", "safesearch", "image_type", "color", "size"],
            SearchKind::Videos => &["count", "offset", "safesearch", "freshness", "video_duration"],
            SearchKind::News => &["count", "offset", "safesearch", "freshness"],
        }
    }

    /// Label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::Web => "Search",
            SearchKind::Images => "Images",
            SearchKind::Videos => "Videos",
            SearchKind::News => "News",
        }
    }
}

/// Build the upstream parameter list from the caller's query string
///
/// `q` comes first, followed by allow-listed parameters that carry a value.
pub fn forward_params(
    kind: SearchKind,
    raw: &HashMap<String, String>,
) -> ProxyResult<Vec<(String, String)>> {
    let query = raw
        .get("q")
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ProxyError::InvalidInput("Search query is required".to_string()))?;

    let mut params = vec![("q".to_string(), query.clone())];
    params.extend(kind.allowed_params().iter().filter_map(|name| {
        raw.get(*name)
            .filter(|value| !value.is_empty())
            .map(|value| (name.to_string(), value.clone()))
    }));

    Ok(params)
}

/// Validate, filter and forward one search request
pub async fn forward(
    provider: &dyn SearchProvider,
    kind: SearchKind,
    raw: &HashMap<String, String>,
) -> ProxyResult<Value> {
    let params = forward_params(kind, raw)?;

    tracing::info!(
        kind = kind.path_segment(),
        params = params.len(),
        "Forwarding search request"
    );

    provider.search(kind, &params).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_query_is_invalid() {
        let err = forward_params(SearchKind::Web, &raw(&[("count", "5")])).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidInput(_)));
    }

    #[test]
    fn test_blank_query_is_invalid() {
        let err = forward_params(SearchKind::News, &raw(&[("q", "   ")])).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidInput(_)));
    }

    #[test]
    fn test_drops_params_outside_allow_list() {
        let params = forward_params(
            SearchKind::Images,
            &raw(&[("q", "cats"), ("color", "red"), ("freshness", "pd"), ("api_key", "x")]),
        )
        .unwrap();

        assert_eq!(
            params,
            vec![
                ("q".to_string(), "cats".to_string()),
                ("color".to_string(), "red".to_string()),
            ]
        );
    }

    #[test]
    fn test_web_forwards_in_allow_list_order() {
        let params = forward_params(
            SearchKind::Web,
            &raw(&[("result_filter", "web"), ("q", "rust"), ("country", "us"), ("offset", "")]),
        )
        .unwrap();

        let names: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["q", "country", "result_filter"]);
    }

    #[test]
    fn test_videos_allow_duration() {
        let params = forward_params(
            SearchKind::Videos,
            &raw(&[("q", "talks"), ("video_duration", "long")]),
        )
        .unwrap();
        assert!(params.contains(&("video_duration".to_string(), "long".to_string())));
    }

    #[test]
    fn test_path_segments_are_distinct() {
        let segments: std::collections::HashSet<_> =
            SearchKind::ALL.iter().map(|k| k.path_segment()).collect();
        assert_eq!(segments.len(), SearchKind::ALL.len());
    }
}
