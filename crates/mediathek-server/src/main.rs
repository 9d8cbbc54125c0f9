//! mediathek-server - HTTP API for the Freies Radio mediathek
//!
//! Reads `.env` and the environment, then serves the today/week views of
//! the scraped program archive.

use std::sync::Arc;

use mediathek_core::{MediathekScraper, Settings};
use mediathek_server::{AppState, build_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting mediathek-server v{}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::from_env()?;
    info!(
        cache_ttl = ?settings.cache_ttl,
        request_timeout = ?settings.request_timeout,
        head_timeout = ?settings.head_timeout,
        timezone = %settings.timezone,
        "settings loaded"
    );

    let scraper = MediathekScraper::with_config(settings.client_config())?;
    let app = build_router(AppState::new(Arc::new(scraper), &settings));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    info!("mediathek-server listening on http://{}", settings.bind_addr);
    info!("Health check: http://{}/health", settings.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
