//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::backends::{
    search_api::SearchApiBackend, wikipedia::WikipediaBackend, EncyclopediaBackend,
    SearchProvider, SuggestionProvider,
};
use crate::config::Config;
use crate::error::ProxyResult;
use crate::resolver::Resolver;

/// Shared application state
///
/// Everything in here is read-only after startup; requests share nothing
/// mutable.
#[derive(Clone)]
pub struct AppState {
    /// Aggregation search API
    pub search: Arc<dyn SearchProvider>,
    /// Query suggestions
    pub suggestions: Arc<dyn SuggestionProvider>,
    /// Encyclopedia summary resolver
    pub resolver: Resolver,
    /// Overall deadline for one resolution
    pub wiki_deadline: Duration,
}

impl AppState {
    /// Build state with the real upstream backends
    pub fn from_config(config: &Config) -> ProxyResult<Self> {
        let search_api = Arc::new(SearchApiBackend::new(config.search.clone(), &config.http)?);
        if !search_api.is_available() {
            tracing::warn!(
                "Backend '{}' is not available (set SEARCH_API_KEY)",
                search_api.name()
            );
        }

        let wiki: Arc<dyn EncyclopediaBackend> =
            Arc::new(WikipediaBackend::new(config.wiki.clone(), &config.http)?);
        tracing::info!("Using {} backend at {}", wiki.name(), config.wiki.base_url);

        Ok(Self::new(
            search_api.clone(),
            search_api,
            Resolver::new(wiki, config.wiki.search_limit),
            Duration::from_secs(config.wiki.deadline_seconds),
        ))
    }

    /// Build state from explicit collaborators
    pub fn new(
        search: Arc<dyn SearchProvider>,
        suggestions: Arc<dyn SuggestionProvider>,
        resolver: Resolver,
        wiki_deadline: Duration,
    ) -> Self {
        Self {
            search,
            suggestions,
            resolver,
            wiki_deadline,
        }
    }
}
