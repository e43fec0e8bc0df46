/// Service configuration from environment variables
///
/// Controls where the wallet-extension bridge lives, which address the API
/// binds to and which origins may call it. Session settings (default
/// network, state directory, timeouts) come from [`SessionConfig`].

use std::env;

use parityscan::SessionConfig;

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Base URL of the wallet-extension bridge
    pub bridge_url: String,
    /// Address the HTTP API listens on
    pub bind_address: String,
    /// Comma separated CORS origins; any origin when unset
    pub allowed_origins: Option<String>,
    pub session: SessionConfig,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `WALLET_BRIDGE_URL`: wallet bridge endpoint (default "http://localhost:3001")
    /// - `BIND_ADDRESS`: listen address (default "0.0.0.0:3000")
    /// - `ALLOWED_ORIGINS`: CORS origins for production (optional)
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Local development against the mock bridge
    /// WALLET_BRIDGE_URL=http://localhost:3001 BIND_ADDRESS=127.0.0.1:3000 cargo run
    /// ```
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bridge_url = env::var("WALLET_BRIDGE_URL").unwrap_or(defaults.bridge_url);
        log::info!("🔌 Wallet bridge URL: {}", bridge_url);

        // Use BIND_ADDRESS=127.0.0.1:3000 for local development
        let bind_address = env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .ok()
            .filter(|origins| !origins.trim().is_empty());

        Self {
            bridge_url: bridge_url.trim_end_matches('/').to_string(),
            bind_address,
            allowed_origins,
            session: SessionConfig::from_env(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bridge_url: "http://localhost:3001".to_string(),
            bind_address: "0.0.0.0:3000".to_string(),
            allowed_origins: None,
            session: SessionConfig::default(),
        }
    }
}
