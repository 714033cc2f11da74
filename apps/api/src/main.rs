mod analysis;
mod config;
mod errors;
mod extract;
mod interview;
mod lexicon;
mod polish;
mod routes;
mod sanitize;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extract::Extractor;
use crate::polish::{AnswerPolisher, DisabledPolisher, LlmPolisher};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Profile API v{}", env!("CARGO_PKG_VERSION"));

    // Build the extraction chain from configured capabilities
    let extractor = Arc::new(Extractor::new(config.extractor));

    // Polisher: generative rewrite when a key is present, pass-through otherwise
    let polisher: Arc<dyn AnswerPolisher> = match &config.anthropic_api_key {
        Some(key) => {
            info!("Answer polisher enabled (model: {})", polish::MODEL);
            Arc::new(LlmPolisher::new(key.clone()))
        }
        None => {
            info!("No ANTHROPIC_API_KEY set; answer polishing disabled");
            Arc::new(DisabledPolisher)
        }
    };

    let state = AppState {
        config: config.clone(),
        extractor,
        polisher,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
