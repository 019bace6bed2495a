mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::generator::ResumeGenerator;
use crate::llm_client::LlmClient;
use crate::render::ChromiumEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Text generation backend
    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_api_url.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Headless browser; one instance is launched per PDF and torn down after
    let browser = ChromiumEngine::new(config.chrome_executable.clone(), config.chrome_no_sandbox);
    match &config.chrome_executable {
        Some(path) => info!("Chromium executable: {}", path.display()),
        None => info!("Chromium executable: auto-detect"),
    }

    let state = AppState {
        generator: ResumeGenerator::new(Arc::new(llm), Arc::new(browser)),
        config: config.clone(),
    };
    info!(
        "Generation timeout: {}s",
        state.config.generation_timeout_secs
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
