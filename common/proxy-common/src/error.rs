//! Error envelope shared by all proxy services
//!
//! Every failed request is answered with the same JSON body so clients can
//! handle errors uniformly regardless of which endpoint produced them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON body returned for every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
    /// Status code returned by the upstream service, when one was received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            upstream_status: None,
        }
    }

    pub fn with_upstream_status(mut self, status: Option<u16>) -> Self {
        self.upstream_status = status;
        self
    }
}

/// Build an error response with the shared JSON envelope
///
/// Server errors (5xx) are logged at `error`, client errors at `debug`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::http::StatusCode;
/// use proxy_common::{error_response, ErrorBody};
///
/// return error_response(StatusCode::BAD_REQUEST, ErrorBody::new("q is required"));
/// ```
pub fn error_response(status: StatusCode, body: ErrorBody) -> Response {
    if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            upstream_status = ?body.upstream_status,
            "{}",
            body.error
        );
    } else {
        tracing::debug!(status = status.as_u16(), "{}", body.error);
    }

    (status, Json(body)).into_response()
}
