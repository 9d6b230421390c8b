use anyhow::Result;
use tracing::info;

use apphub_api::{app, catalog, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting AppHub API v{}", env!("CARGO_PKG_VERSION"));

    middleware::init_metrics()?;

    // Select the catalog strategy (mock, live, or unavailable)
    let catalog = catalog::init(&config).await;
    info!(source = %catalog.kind(), "Catalog ready");

    // Build application
    let app = app::create_app(config.clone(), catalog.clone());

    // Start server
    let addr = config.socket_addr()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    catalog.close().await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
