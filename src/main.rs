// image-analyzer - HTTP image analysis service backed by Azure Computer Vision
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use image_analyzer::analysis::ImageAnalysisService;
use image_analyzer::cli::Args;
use image_analyzer::config::AppConfig;
use image_analyzer::server::create_router;
use image_analyzer::utils::logging;
use image_analyzer::vision::AzureVisionClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting image-analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the vision provider client
    info!(
        "Using vision endpoint {} (key {})",
        config.vision.endpoint,
        logging::mask(config.vision.api_key.expose())
    );
    let client = AzureVisionClient::new(&config.vision)?;
    let service = ImageAnalysisService::new(Arc::new(client));

    // Phase 4: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, service)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
