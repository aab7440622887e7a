//! Search Proxy Library
//!
//! Forwards web, image, video and news searches to a bearer-authenticated
//! aggregation API, and resolves a best-match encyclopedia summary for a term.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use search_proxy::{backends::wikipedia::WikipediaBackend, Config, Resolver};
//!
//! let config = Config::default();
//! let wiki = WikipediaBackend::new(config.wiki.clone(), &config.http)?;
//! let resolver = Resolver::new(Arc::new(wiki), config.wiki.search_limit);
//! let summary = resolver.resolve("Mercury", "en").await?;
//! ```
//!
//! # Configuration
//! Set `SEARCH_API_KEY` env var or configure in `~/.config/search-proxy/config.toml`

pub mod backends;
pub mod config;
pub mod error;
pub mod http;
pub mod proxy;
pub mod resolver;
pub mod server;
pub mod types;

// Re-export main types
pub use config::Config;
pub use error::{ProxyError, ProxyResult};
pub use proxy::SearchKind;
pub use resolver::Resolver;
pub use server::{create_router, AppState};
pub use types::{PageSummary, ResolvedSummary, SearchCandidate};
