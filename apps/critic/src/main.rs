use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_critic::config::Config;
use resume_critic::routes::build_router;
use resume_critic::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = &config.rust_log;
            EnvFilter::new(format!(
                "resume_critic={level},critic_api={level},tower_http={level}"
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Critic API v{}", env!("CARGO_PKG_VERSION"));
    match &config.anthropic_api_key {
        Some(_) => info!("Model backend configured (model: {})", config.llm_model),
        None => info!("No ANTHROPIC_API_KEY set; serving rule-based suggestions only"),
    }

    let state = AppState::new(config.clone());
    let models = Arc::clone(&state.models);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its state clones are gone once serve returns.
    match Arc::into_inner(models) {
        Some(mut provider) => provider.teardown(),
        None => warn!("Model provider still shared at shutdown; skipping teardown"),
    }
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
