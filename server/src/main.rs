//! Plant Care API Server
//!
//! HTTP API for heuristic plant-health classification. Accepts image
//! uploads, runs the color-analysis pipeline, and returns a disease label,
//! confidence and treatment recommendation.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use plantcare_analysis::PlantAnalyzer;
use plantcare_core::{load_toml_config, AnalysisConfig};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::state::{AppState, ServerConfig};

/// Plant Care API Server
#[derive(Parser, Debug)]
#[command(name = "plantcare-server")]
#[command(version = "0.1.0")]
#[command(about = "HTTP API for heuristic plant-health classification")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Optional analysis configuration file (TOML)
    #[arg(long, env = "PLANTCARE_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum upload size in megabytes
    #[arg(long, default_value = "10")]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    // Build analysis configuration
    let analysis_config = match &cli.config {
        Some(path) => load_toml_config::<AnalysisConfig>(path)?,
        None => AnalysisConfig::default(),
    };
    analysis_config.validate()?;

    let server_config = ServerConfig {
        max_upload_bytes: cli.max_upload_mb * 1024 * 1024,
    };

    info!("Plant Care API Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!(
        "  Analysis config: {}",
        cli.config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string())
    );
    info!("  Max upload:      {} MB", cli.max_upload_mb);

    // Create shared state
    let analyzer = PlantAnalyzer::new(analysis_config);
    let state = Arc::new(AppState::new(server_config.clone(), analyzer));

    // Build router
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/predict", post(routes::predict::predict))
        .with_state(state)
        // Multipart encoding overhead on top of the raw file cap
        .layer(DefaultBodyLimit::max(
            server_config.max_upload_bytes + 64 * 1024,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
