//! RULETA — Roulette round registry and settlement service
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the in-memory registry and serves the HTTP API until Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use ruleta::api;
use ruleta::api::routes::ApiState;
use ruleta::config;
use ruleta::engine::RoundRegistry;

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = config::AppConfig::load_or_default(CONFIG_PATH)?;

    init_logging(&cfg);

    info!(
        addr = %cfg.bind_addr(),
        seeded = cfg.wheel.seed.is_some(),
        "RULETA starting up"
    );
    if cfg.wheel.seed.is_some() {
        warn!("Wheel seed configured; draws are reproducible");
    }

    let registry = RoundRegistry::in_memory(cfg.wheel.seed);
    let state = Arc::new(ApiState::new(registry));

    api::serve(state, &cfg.bind_addr(), shutdown_signal()).await?;

    info!("RULETA shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received."),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging(cfg: &config::AppConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_filter = cfg
        .logging
        .filter
        .clone()
        .unwrap_or_else(|| "ruleta=info,tower_http=info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json_logging = cfg.logging.json || std::env::var("RULETA_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
