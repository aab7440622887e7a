//! HTTP server module
//!
//! Exposes the search passthrough endpoints, suggestions, and the
//! encyclopedia resolver under `/api`.

pub mod api;
pub mod state;

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
pub use state::AppState;

/// Start the HTTP server
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    proxy_common::serve(app, addr).await
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Search passthrough
        .route("/search", get(api::web_search))
        .route("/images", get(api::image_search))
        .route("/videos", get(api::video_search))
        .route("/news", get(api::news_search))
        // Suggestions
        .route("/suggest", get(api::suggest))
        // Encyclopedia
        .route("/wiki", get(api::wiki_summary))
        // Health
        .route("/health", get(api::health_check));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
