//! Search Proxy Server
//!
//! Search API passthrough plus encyclopedia summary resolution over HTTP.
//!
//! # Configuration
//! Set `SEARCH_API_KEY` env var or configure in `~/.config/search-proxy/config.toml`

use clap::Parser;
use std::path::PathBuf;

use search_proxy::Config;

/// Search proxy with encyclopedia summary resolution
#[derive(Parser, Debug)]
#[command(name = "search-proxy", version, about)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "SEARCH_PROXY_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SEARCH_PROXY_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    proxy_common::init_tracing("search_proxy")?;

    let args = Args::parse();

    tracing::info!("Starting Search Proxy");

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Search API URL: {}", config.search.base_url);

    search_proxy::server::serve(&config).await
}
