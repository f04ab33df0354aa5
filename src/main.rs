use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use job_feeds::config::Config;
use job_feeds::fetcher::Fetcher;
use job_feeds::routes::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "job_feeds=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; both source URLs have defaults, so a missing
    // file is not fatal
    let config = match Config::load("sources.toml") {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not read sources.toml ({e}), using defaults");
            Config::default()
        }
    };
    info!(
        "Aggregating {} and {}",
        config.sources.arbeitnow_url, config.sources.devitjobs_url
    );

    // Create fetcher and app state
    let fetcher = Arc::new(Fetcher::new(&config));
    let state = Arc::new(AppState { fetcher });

    // Build router
    let app = routes::app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server starting on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
