// Main entry point for API server

use anyhow::{Context, Result};
use server_core::{kernel::build_pipeline, server::build_app, telemetry, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before logging so LOG_LEVEL is honoured
    let _ = dotenvy::dotenv();
    telemetry::init_tracing();

    tracing::info!("Starting GeopoliticAI API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Build application
    let pipeline = build_pipeline(&config)?;
    let app = build_app(pipeline);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
