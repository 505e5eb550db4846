use anyhow::Result;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crossbook_core::SourceRegistry;
use feed_api_rust::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting Feed API Service...");

    let config = Config::from_env();

    let registry = SourceRegistry::with_defaults();
    info!("Serving sources: {:?}", registry.names());

    let state = AppState::new(registry);
    let router = create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Feed API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Received shutdown signal");
}
