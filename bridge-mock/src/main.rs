/// Wallet Bridge Mock Server
///
/// A lightweight server that answers wallet extension calls (install check,
/// enable, chain suggestion, key requests) with deterministic keys.
/// Designed for local development and integration tests.

use anyhow::{Context, Result};
use std::sync::Arc;

use wallet_bridge_mock::{run_server, MockConfig, MockState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting wallet bridge mock...");

    // Load configuration
    let config = MockConfig::from_env().context("Failed to load configuration")?;

    log::info!("Known chains: {:?}", config.known_chains);
    if !config.denied_chains.is_empty() {
        log::info!("Denied chains: {:?}", config.denied_chains);
    }
    let host = config.server_host.clone();
    let port = config.server_port;

    run_server(Arc::new(MockState::new(config)), host, port)
        .await
        .context("Server error")?;

    Ok(())
}
