//! Shared HTTP client construction for upstream requests

use reqwest::Client;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::{ProxyError, ProxyResult};

/// Build a [`reqwest::Client`] with the configured per-request timeout.
///
/// # Errors
///
/// Returns [`ProxyError::Config`] if the client cannot be constructed.
pub fn build_client(config: &HttpConfig, user_agent: &str) -> ProxyResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(user_agent)
        .build()
        .map_err(|e| ProxyError::Config(format!("failed to build HTTP client: {e}")))
}
