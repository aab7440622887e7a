//! REST API handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::state::AppState;
use crate::error::ProxyResult;
use crate::proxy::{self, SearchKind};
use crate::resolver::DEFAULT_LANG;
use crate::types::{ResolvedSummary, Suggestions};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub search_backend: String,
    pub search_api_configured: bool,
    pub encyclopedia_backend: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        search_backend: state.search.name().to_string(),
        search_api_configured: state.search.is_available(),
        encyclopedia_backend: state.resolver.backend_name().to_string(),
    })
}

// ============================================================================
// Search passthrough
// ============================================================================

async fn forward(
    state: &AppState,
    kind: SearchKind,
    params: &HashMap<String, String>,
) -> ProxyResult<Json<Value>> {
    proxy::forward(state.search.as_ref(), kind, params)
        .await
        .map(Json)
}

/// Web search
pub async fn web_search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ProxyResult<Json<Value>> {
    forward(&state, SearchKind::Web, &params).await
}

/// Image search
pub async fn image_search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ProxyResult<Json<Value>> {
    forward(&state, SearchKind::Images, &params).await
}

/// Video search
pub async fn video_search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ProxyResult<Json<Value>> {
    forward(&state, SearchKind::Videos, &params).await
}

/// News search
pub async fn news_search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ProxyResult<Json<Value>> {
    forward(&state, SearchKind::News, &params).await
}

// ============================================================================
// Suggestions
// ============================================================================

/// Suggestion query parameters
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    pub q: Option<String>,
}

/// Query suggestions; always succeeds
pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Json<Suggestions> {
    let suggestions = match params.q.as_deref() {
        Some(q) if !q.trim().is_empty() => state.suggestions.suggest(q).await,
        _ => Vec::new(),
    };

    Json(Suggestions { suggestions })
}

// ============================================================================
// Encyclopedia
// ============================================================================

/// Encyclopedia query parameters
#[derive(Debug, Deserialize)]
pub struct WikiQuery {
    pub q: Option<String>,
    pub lang: Option<String>,
}

impl WikiQuery {
    /// Requested language, `en` when absent or blank
    pub fn lang(&self) -> &str {
        self.lang
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANG)
    }
}

/// Best-match encyclopedia summary, or `null`
pub async fn wiki_summary(
    State(state): State<AppState>,
    Query(params): Query<WikiQuery>,
) -> ProxyResult<Json<Option<ResolvedSummary>>> {
    let query = params.q.as_deref().unwrap_or_default();
    let lang = params.lang();

    tracing::info!(lang, "Resolving encyclopedia summary");

    let summary = state
        .resolver
        .resolve_within(query, lang, state.wiki_deadline)
        .await?;

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiki_lang_defaults_to_en() {
        let q = WikiQuery {
            q: Some("Mercury".into()),
            lang: None,
        };
        assert_eq!(q.lang(), "en");

        let q = WikiQuery {
            q: Some("Mercury".into()),
            lang: Some("  ".into()),
        };
        assert_eq!(q.lang(), "en");
    }

    #[test]
    fn test_wiki_lang_passthrough() {
        let q = WikiQuery {
            q: None,
            lang: Some("de".into()),
        };
        assert_eq!(q.lang(), "de");
    }
}
