//! Tabular Server
//!
//! An HTTP service that extracts tables from uploaded PDFs, with optional
//! OCR preprocessing for scanned documents.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabular_server::config::Config;
use tabular_server::engine::{ExtractionService, GridDetector, GridFormatter, LopdfBinding};
use tabular_server::ocr::{OcrMyPdf, OcrTool};
use tabular_server::routes;
use tabular_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabular_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Starting Tabular Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("OCR program: {}", config.ocr.program);
    tracing::info!(
        "Extraction timeout: {}s, OCR timeout: {}s",
        config.extraction.timeout_secs,
        config.ocr.timeout_secs
    );

    // Process-wide extraction collaborators, shared by every request
    let extraction = ExtractionService::new(
        Arc::new(LopdfBinding::new()),
        Arc::new(GridDetector::new()),
        Arc::new(GridFormatter::new()),
        Duration::from_secs(config.extraction.timeout_secs),
    );

    let ocr: Arc<dyn OcrTool> = Arc::new(OcrMyPdf::new(&config.ocr));
    if !ocr.is_available().await {
        tracing::warn!(
            "OCR program '{}' is not runnable; /api/extract-tables-ocr requests will fail",
            config.ocr.program
        );
    }

    let state = AppState::new(config.clone(), extraction, ocr);

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Tabular Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
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
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
