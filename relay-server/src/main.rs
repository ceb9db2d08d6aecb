//! Relay Server - Headless Daemon
//!
//! A small HTTP server that:
//! - Relays single chat messages to the provider's chat model on /chat
//! - Submits image jobs and polls them to completion on /generate-image
//!
//! Access via: http://localhost:3000

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod server_utils;

use cli::Cli;
use relay_core::{backoff::worst_case_wait, build_relay_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Before clap runs, so its env fallbacks see the file's values
    let env_file = config::load_env_file()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(path) = env_file {
        info!("📄 Loaded environment from {}", path.display());
    }

    let relay_config = config::build_config(&cli)?;
    if relay_config.upstream.api_key.is_empty() {
        warn!("⚠️ FIREWORKS_API_KEY is not set; provider calls will be rejected");
    }

    info!("🚀 Inference Relay starting on port {}...", cli.port);
    info!("🔀 Provider: {}", relay_config.upstream.base_url);
    info!("💬 Chat model: {}", relay_config.chat.model);
    info!(
        "🖼️ Image model: {} (max {} polls, worst-case wait {:?})",
        relay_config.image.model,
        relay_config.poll.max_attempts,
        worst_case_wait(&relay_config.poll)
    );

    let state = AppState::from_config(&relay_config)?;
    let app = build_relay_router(state);

    let listener = server_utils::create_listener(&cli.host, cli.port).await?;
    info!("🌐 Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("✅ Server stopped");
    Ok(())
}
