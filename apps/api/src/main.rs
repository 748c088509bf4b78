mod config;
mod document;
mod errors;
mod jobpost;
mod models;
mod routes;
mod state;
mod tailoring;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::tailoring::nlp::Capabilities;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Base tailoring config (TOML + optional YAML stopwords)
    let tailor_config = config.load_tailor_config()?;
    info!(
        per_role_keep = tailor_config.selection.per_role_keep,
        min_per_role_keep = tailor_config.selection.min_per_role_keep,
        guardrails = tailor_config.guardrails.len(),
        stopwords = tailor_config.stopwords.len(),
        "Tailor config loaded"
    );

    let capabilities = Capabilities::detect();
    info!(linguistic = capabilities.has_linguistic(), "Tokenizer capabilities detected");

    let state = AppState {
        tailor_config: Arc::new(tailor_config),
        capabilities,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
