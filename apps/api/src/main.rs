mod analysis;
mod config;
mod errors;
mod llm_client;
mod matching;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::{DeterministicAnalyzer, EnrichedAnalyzer, JobAnalyzer};
use crate::analysis::enrichment::LlmEnrichment;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobFit API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = build_analyzer(&config)?;
    info!("Job analyzer initialized (backend: {})", analyzer.backend());

    let state = AppState {
        config: config.clone(),
        analyzer,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// DeterministicAnalyzer by default; EnrichedAnalyzer when an API key is configured
/// and ENABLE_AI_ENRICHMENT is not false.
fn build_analyzer(config: &Config) -> Result<Arc<dyn JobAnalyzer>> {
    let Some(api_key) = config
        .anthropic_api_key
        .clone()
        .filter(|_| config.enrichment_enabled())
    else {
        return Ok(Arc::new(DeterministicAnalyzer));
    };

    let llm = LlmClient::new(api_key).context("Failed to build LLM client")?;
    info!(
        "AI enrichment enabled (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.enrichment_timeout
    );

    Ok(Arc::new(EnrichedAnalyzer::new(
        Arc::new(LlmEnrichment::new(llm)),
        config.enrichment_timeout,
    )))
}
