//! Error types for search-proxy operations
//!
//! Only the calls whose failure cannot be recovered by trying a different
//! candidate are represented here. Failures during the encyclopedia fallback
//! scan never become a `ProxyError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use proxy_common::{error_response, ErrorBody};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced to callers of the proxy and the resolver
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The caller supplied an empty query or an unusable parameter
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The search API credential is not configured
    #[error("API key not configured")]
    MissingApiKey,

    /// The search call failed (encyclopedia page search or aggregation API)
    #[error("search upstream failed{}: {message}", fmt_status(.status))]
    UpstreamSearch {
        /// Upstream HTTP status, if a response was received
        status: Option<u16>,
        message: String,
    },

    /// The primary page summary fetch failed
    #[error("summary upstream failed{}: {message}", fmt_status(.status))]
    UpstreamSummary {
        /// Upstream HTTP status, if a response was received
        status: Option<u16>,
        message: String,
    },

    /// The overall deadline for a request expired
    #[error("upstream timed out after {0:?}")]
    UpstreamTimeout(Duration),

    /// Configuration is unusable (e.g. malformed base URL)
    #[error("config error: {0}")]
    Config(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" with status {}", code),
        None => String::new(),
    }
}

/// Result type alias for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

impl ProxyError {
    /// Status code returned by the upstream service, when known
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProxyError::UpstreamSearch { status, .. } | ProxyError::UpstreamSummary { status, .. } => {
                *status
            }
            _ => None,
        }
    }

    /// HTTP status this error maps to at the service boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ProxyError::MissingApiKey | ProxyError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::UpstreamSearch { .. } | ProxyError::UpstreamSummary { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub(crate) fn search(status: Option<u16>, message: impl Into<String>) -> Self {
        ProxyError::UpstreamSearch {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn summary(status: Option<u16>, message: impl Into<String>) -> Self {
        ProxyError::UpstreamSummary {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorBody::new(self.to_string()).with_upstream_status(self.upstream_status());
        error_response(self.status_code(), body)
    }
}
