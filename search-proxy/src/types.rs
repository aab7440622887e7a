//! Data shapes exchanged with the encyclopedia API and returned to callers
//!
//! `SearchCandidate` and `PageSummary` mirror upstream payloads and only live
//! for the duration of one resolution. `ResolvedSummary` is the one record
//! the resolver hands back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A ranked hit from the page search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Stable page identifier used to fetch the summary
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Page search response envelope
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageSearchResponse {
    #[serde(default)]
    pub pages: Vec<SearchCandidate>,
}

/// Raw page summary as returned by the summary endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
    /// Passed through to callers untouched
    #[serde(default)]
    pub thumbnail: Option<Value>,
    #[serde(default)]
    pub content_urls: Option<ContentUrls>,
    /// Page type tag, e.g. `standard` or `disambiguation`
    #[serde(default, rename = "type")]
    pub page_type: Option<String>,
    #[serde(default)]
    pub pageprops: Option<PageProps>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentUrls {
    #[serde(default)]
    pub desktop: Option<PlatformUrls>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformUrls {
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageProps {
    #[serde(default)]
    pub disambiguation: Option<Value>,
}

impl PageSummary {
    /// Whether the summary service marks this page as a disambiguation page.
    ///
    /// Either the `type` tag or a `pageprops.disambiguation` entry is enough.
    /// MediaWiki stores the page prop as an empty string, so any value other
    /// than `null` or `false` counts.
    pub fn is_disambiguation(&self) -> bool {
        if self.page_type.as_deref() == Some("disambiguation") {
            return true;
        }

        matches!(
            self.pageprops.as_ref().and_then(|p| p.disambiguation.as_ref()),
            Some(value) if !matches!(value, Value::Null | Value::Bool(false))
        )
    }

    /// Canonical desktop URL, if the service provided a non-empty one
    pub fn desktop_url(&self) -> Option<&str> {
        self.content_urls
            .as_ref()
            .and_then(|urls| urls.desktop.as_ref())
            .and_then(|desktop| desktop.page.as_deref())
            .filter(|page| !page.is_empty())
    }
}

/// Normalized summary returned by the resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSummary {
    pub title: String,
    pub description: String,
    pub extract: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Value>,
    pub url: String,
}

impl ResolvedSummary {
    /// Normalize a raw summary; `fallback_url` is used when the service
    /// did not provide a desktop URL
    pub fn from_summary(summary: PageSummary, fallback_url: impl FnOnce() -> String) -> Self {
        let url = match summary.desktop_url() {
            Some(page) => page.to_string(),
            None => fallback_url(),
        };

        Self {
            title: summary.title,
            description: summary.description.unwrap_or_default(),
            extract: summary.extract.unwrap_or_default(),
            thumbnail: summary.thumbnail,
            url,
        }
    }
}

/// Suggestion endpoint response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub suggestions: Vec<String>,
}
