mod config;
mod errors;
mod extraction;
mod feedback;
mod models;
mod routes;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::DefaultExtractor;
use crate::feedback::store::JsonFileStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Screener v{}", env!("CARGO_PKG_VERSION"));

    let feedback = JsonFileStore::new(config.feedback_store_path.clone());
    info!("Feedback store at {}", feedback.path().display());

    info!(
        max_file_size_bytes = config.max_file_size_bytes,
        max_batch_size = config.max_batch_size,
        enforce_batch_limit = config.enforce_batch_limit,
        duplicate_threshold = config.duplicate_threshold,
        "Screening limits"
    );

    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(DefaultExtractor),
        feedback: Arc::new(feedback),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the upload form has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
