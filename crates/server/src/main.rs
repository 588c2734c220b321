//! Entry point for the Ghibli catalog facade.
//!
//! Wires together the environment configuration, the upstream fetch
//! client, the orchestrator, the response cache and the HTTP routes,
//! then serves until stopped.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::GhibliConfig;
use ghibli_client::GhibliClient;
use server::routes::{self, AppState};
use server::{CatalogOrchestrator, ResponseCache};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,ghibli_client=debug".into()),
        )
        .init();

    info!("Starting Ghibli catalog facade");

    let config = GhibliConfig::from_env();
    info!("Using Ghibli API at {}", config.host);

    // The request timeout lives on the shared reqwest client; the fetch
    // layer itself stays timeout-unaware.
    let timeout_secs: u64 = env::var("GHIBLI_TIMEOUT_SECS")
        .unwrap_or_else(|_| "10".into())
        .parse()
        .context("GHIBLI_TIMEOUT_SECS must be a number")?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Building the upstream HTTP client")?;

    let client = GhibliClient::with_client(http, config.host.clone());
    let orchestrator = CatalogOrchestrator::new(client, config)?;

    let cache_ttl_secs: u64 = env::var("CACHE_TTL_SECS")
        .unwrap_or_else(|_| "60".into())
        .parse()
        .context("CACHE_TTL_SECS must be a number")?;
    let cache = ResponseCache::new(Duration::from_secs(cache_ttl_secs));
    info!("Caching successful responses for {}s", cache_ttl_secs);

    let state = AppState {
        orchestrator,
        cache,
    };
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .context("PORT must be a number")?;
    let addr = SocketAddr::new(host.parse().context("Invalid HOST")?, port);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Binding the listen address")?;
    axum::serve(listener, app).await.context("Serving HTTP")?;

    Ok(())
}
