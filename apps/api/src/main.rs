mod config;
mod errors;
mod evaluation;
mod llm_client;
mod routes;
mod scoring;
mod sections;
mod state;
mod text_extraction;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, LlmSettings};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume evaluator v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let mut settings = LlmSettings {
        timeout: config.llm_timeout,
        max_retries: config.llm_max_retries,
        ..LlmSettings::default()
    };
    if let Some(url) = &config.llm_api_url {
        settings.api_url = url.clone();
    }
    let llm = LlmClient::new(config.anthropic_api_key.clone(), settings)
        .context("Failed to build LLM HTTP client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?}, retries: {})",
        llm_client::MODEL,
        config.llm_timeout,
        config.llm_max_retries
    );

    let state = AppState {
        collaborator: Arc::new(llm),
        config: config.clone(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
