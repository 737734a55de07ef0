//! regal-rss server entry point.
//!
//! Loads configuration, opens the cache, and serves the feed over HTTP.
//! Logs are JSON on stderr.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use regal_client::{RegalClient, RegalConfig};
use regal_core::{AppConfig, CacheDb};
use regal_server::{AppState, FeedService, run_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let addr: SocketAddr = config.bind_addr.parse().context("parsing bind_addr")?;

    tracing::info!(
        db_path = %config.db_path.display(),
        cinema_id = %config.cinema_id,
        interval_secs = config.update_interval_secs,
        "Starting regal-rss"
    );

    let cache = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening cache at {}", config.db_path.display()))?;
    let client = RegalClient::new(RegalConfig::from(&config)).context("building upstream client")?;

    let feed = FeedService::new(cache, Arc::new(client), config.update_interval());
    run_server(AppState::new(feed, config), addr).await?;

    Ok(())
}
