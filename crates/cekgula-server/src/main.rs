//! cekgula diabetes risk self-assessment server
//!
//! Serves the REST API and, when configured, the static frontend.

use anyhow::Result;
use cekgula_server::api;
use cekgula_server::config::ServerConfig;
use cekgula_server::engine;
use cekgula_server::DiagnosisService;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(
        "Loaded configuration: store={:?}, ruleset={:?}, scoring={:?}",
        config.store, config.ruleset, config.scoring
    );

    let evaluator = engine::init_evaluator(&config)?;
    let store = engine::init_store(&config).await?;
    let service = DiagnosisService::new(store, evaluator);

    let app = match &config.static_dir {
        Some(dir) => {
            info!("Serving static files from {:?}", dir);
            api::create_router_with_static(service, dir)
        }
        None => api::create_router(service),
    };

    // Start server
    let addr = config.listen_addr();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Diagnosis API: POST http://{}/diagnosis/process", addr);
    info!("  Inline classification: POST http://{}/diagnosis/classify", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "cekgula_server={level},cekgula_repository={level},cekgula_core={level},cekgula_parser={level},tower_http=debug"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
