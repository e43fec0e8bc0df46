/// Session configuration from environment variables
///
/// Controls the default network, where durable local state lives, an
/// optional networks file and how long a single wallet call may take.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::route::DEFAULT_NETWORK;

/// Chains the MetaMask cosmos snap cannot derive keys for (ethsecp256k1 chains)
pub const NOT_SUPPORTED_METAMASK_CHAIN_IDS: &[&str] =
    &["evmos_9001-2", "injective-1", "dymension_1100-1"];

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Chain name selected when the route does not name one
    pub default_network: String,
    /// Directory of the durable local state file
    pub state_dir: PathBuf,
    /// Optional JSON list of networks merged after the built-in ones
    pub networks_file: Option<PathBuf>,
    /// Upper bound for each wallet adapter call
    pub adapter_timeout: Duration,
    /// Chain ids skipped by single-network (MetaMask) connections
    pub unsupported_single_chain_ids: Vec<String>,
}

impl SessionConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `DEFAULT_NETWORK`: chain name used as route fallback (default "prysmdevnet")
    /// - `STATE_DIR`: directory for local state (default "./state")
    /// - `NETWORKS_FILE`: JSON file with additional networks (optional)
    /// - `ADAPTER_TIMEOUT_SECS`: per-call wallet timeout (default 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_network = env::var("DEFAULT_NETWORK")
            .map(|n| n.to_lowercase())
            .unwrap_or(defaults.default_network);
        log::info!("Default network: {}", default_network);

        let state_dir = env::var("STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_dir);
        log::info!("Local state directory: {}", state_dir.display());

        let networks_file = env::var("NETWORKS_FILE").ok().map(PathBuf::from);
        if let Some(ref path) = networks_file {
            log::info!("Networks file: {}", path.display());
        }

        let adapter_timeout = match env::var("ADAPTER_TIMEOUT_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!(
                        "Invalid ADAPTER_TIMEOUT_SECS '{}', using {}s",
                        raw,
                        defaults.adapter_timeout.as_secs()
                    );
                    defaults.adapter_timeout
                }
            },
            Err(_) => defaults.adapter_timeout,
        };

        Self {
            default_network,
            state_dir,
            networks_file,
            adapter_timeout,
            unsupported_single_chain_ids: defaults.unsupported_single_chain_ids,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_network: DEFAULT_NETWORK.to_string(),
            state_dir: PathBuf::from("./state"),
            networks_file: None,
            adapter_timeout: Duration::from_secs(30),
            unsupported_single_chain_ids: NOT_SUPPORTED_METAMASK_CHAIN_IDS
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }
}
