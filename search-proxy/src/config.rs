//! Configuration loading for search-proxy
//!
//! Configuration is loaded from:
//! 1. Environment variables SEARCH_API_KEY / SEARCH_API_URL / WIKI_BASE_URL
//! 2. Environment variable SEARCH_PROXY_CONFIG_PATH
//! 3. ~/.config/search-proxy/config.toml
//! 4. Default values

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::resolver::DEFAULT_SEARCH_LIMIT;

/// Placeholder substituted with the request language in `wiki.base_url`
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Aggregation search API configuration
    #[serde(default)]
    pub search: SearchApiConfig,
    /// Encyclopedia configuration
    #[serde(default)]
    pub wiki: WikiConfig,
    /// Outbound HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

/// Listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Aggregation search API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchApiConfig {
    /// Base URL of the search API (without the `/res/v1/...` path)
    #[serde(default = "default_search_url")]
    pub base_url: String,
    /// Bearer credential sent with every search request
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

/// Encyclopedia configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Base URL template; `{lang}` is replaced with the request language
    #[serde(default = "default_wiki_url")]
    pub base_url: String,
    /// User-Agent sent to the encyclopedia API
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Number of ranked candidates requested per resolution
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    /// Overall deadline for one resolution, across all its requests
    #[serde(default = "default_deadline")]
    pub deadline_seconds: u64,
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_search_url() -> String {
    "https://search.hackclub.com".to_string()
}

fn default_wiki_url() -> String {
    "https://{lang}.wikipedia.org".to_string()
}

fn default_user_agent() -> String {
    concat!("search-proxy/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_deadline() -> u64 {
    10
}

fn default_timeout() -> u64 {
    8
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SearchApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_url(),
            api_key: None,
        }
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: default_wiki_url(),
            user_agent: default_user_agent(),
            search_limit: default_search_limit(),
            deadline_seconds: default_deadline(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

impl WikiConfig {
    /// Base URL for a language, e.g. `https://de.wikipedia.org`
    pub fn base_url_for(&self, lang: &str) -> String {
        self.base_url
            .replace(LANG_PLACEHOLDER, lang)
            .trim_end_matches('/')
            .to_string()
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config_path = explicit_path
            .map(Path::to_path_buf)
            .or_else(Self::find_config_path);

        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_env();
        Ok(config)
    }

    /// Read a TOML config file, falling back to defaults when it does not exist
    pub fn from_file(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::info!("Loading config from: {}", path.display());
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Environment overrides (highest priority)
    fn apply_env(&mut self) {
        let api_key = std::env::var("SEARCH_API_KEY")
            .or_else(|_| std::env::var("VITE_SEARCH_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_some() {
            self.search.api_key = api_key;
        }

        if let Ok(url) = std::env::var("SEARCH_API_URL") {
            self.search.base_url = url;
        }

        if let Ok(url) = std::env::var("WIKI_BASE_URL") {
            self.wiki.base_url = url;
        }
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("SEARCH_PROXY_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.config/search-proxy/config.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home)
                .join(".config")
                .join("search-proxy")
                .join("config.toml");
            return Some(path);
        }

        None
    }
}
