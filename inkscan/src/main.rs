use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkscan::api::{create_router, AppState};
use inkscan::config::Config;
use inkscan::ocr::OcrProvider;
use inkscan::services::seed::EmptySeed;
use inkscan::services::{seed_from_source, ScanSeed, ScanStore};
use inkscan::upload::UploadClient;

#[derive(Parser)]
#[command(name = "inkscan")]
#[command(about = "Self-hostable document scanning service")]
struct Args {
    /// Start with an empty scan history instead of the configured seed
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkscan=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!("Initializing upload client: {}...", config.upload.base_url);
    let upload = UploadClient::new(&config.upload)?;

    let ocr = OcrProvider::new(&config.ocr)?;
    if ocr.is_available() {
        tracing::info!("OCR endpoint configured");
    } else {
        tracing::warn!("OCR_API_URL is not set - scan requests will be rejected");
    }

    let seed: Arc<dyn ScanSeed> = if args.no_seed {
        tracing::info!("Seeding disabled by --no-seed");
        Arc::new(EmptySeed)
    } else {
        seed_from_source(&config.scans.seed)
    };

    let store = ScanStore::new(upload, ocr, seed, &config.scans).await?;
    let state = AppState::new(config.clone(), store);

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Inkscan starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
}
