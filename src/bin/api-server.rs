//! Equiscreen API Server
//!
//! HTTP API exposing strategy screens, raw rankings and per-symbol history.

use dotenvy::dotenv;
use equiscreen::config::ScreenerConfig;
use equiscreen::core::bootstrap::build_runtime;
use equiscreen::core::http::start_server;
use equiscreen::logging;
use equiscreen::metrics::Metrics;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = ScreenerConfig::from_env()?;
    let env = equiscreen::config::get_environment();
    info!("Starting Equiscreen API Server");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        universe_url = %config.universe_url,
        market_data_url = %config.market_data_url,
        concurrency = config.fetch_concurrency,
        "Data sources"
    );

    let metrics = Arc::new(Metrics::new()?);
    let runtime = Arc::new(build_runtime(&config)?.with_metrics(metrics.clone()));

    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, runtime, metrics).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
