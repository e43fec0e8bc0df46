/// Mock bridge configuration
///
/// Which wallets look installed, which chains they already know (with their
/// account prefix) and which chains the simulated user refuses.

use anyhow::{bail, Context, Result};
use parityscan::WalletKind;
use std::collections::{BTreeMap, BTreeSet};
use std::env;

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub server_host: String,
    pub server_port: u16,
    pub installed_wallets: BTreeSet<WalletKind>,
    /// chain id -> bech32 account prefix
    pub known_chains: BTreeMap<String, String>,
    /// Chains whose key requests are rejected
    pub denied_chains: BTreeSet<String>,
    /// Seed for the deterministic per-wallet keys
    pub key_seed: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        let known_chains = [("cosmoshub-4", "cosmos"), ("osmosis-1", "osmo")]
            .into_iter()
            .map(|(id, prefix)| (id.to_string(), prefix.to_string()))
            .collect();

        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3001,
            installed_wallets: [WalletKind::Keplr, WalletKind::Leap].into_iter().collect(),
            known_chains,
            denied_chains: BTreeSet::new(),
            key_seed: "parityscan-mock".to_string(),
        }
    }
}

impl MockConfig {
    /// Environment variables:
    /// - `SERVER_HOST`, `SERVER_PORT` (default 0.0.0.0:3001)
    /// - `INSTALLED_WALLETS`: e.g. "keplr,leap"
    /// - `KNOWN_CHAINS`: e.g. "cosmoshub-4=cosmos,osmosis-1=osmo"
    /// - `DENIED_CHAINS`: e.g. "juno-1"
    /// - `KEY_SEED`
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Self::default();

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = match env::var("SERVER_PORT") {
            Ok(port) => port.parse().context("Invalid SERVER_PORT")?,
            Err(_) => defaults.server_port,
        };

        let installed_wallets = match env::var("INSTALLED_WALLETS") {
            Ok(list) => parse_wallets(&list)?,
            Err(_) => defaults.installed_wallets,
        };

        let known_chains = match env::var("KNOWN_CHAINS") {
            Ok(list) => parse_known_chains(&list)?,
            Err(_) => defaults.known_chains,
        };

        let denied_chains = env::var("DENIED_CHAINS")
            .map(|list| split_list(&list).map(str::to_string).collect())
            .unwrap_or(defaults.denied_chains);

        let key_seed = env::var("KEY_SEED").unwrap_or(defaults.key_seed);

        Ok(Self {
            server_host,
            server_port,
            installed_wallets,
            known_chains,
            denied_chains,
            key_seed,
        })
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_wallets(list: &str) -> Result<BTreeSet<WalletKind>> {
    split_list(list)
        .map(|name| {
            name.parse::<WalletKind>()
                .map_err(|_| anyhow::anyhow!("Unknown wallet in INSTALLED_WALLETS: {}", name))
        })
        .collect()
}

pub fn parse_known_chains(list: &str) -> Result<BTreeMap<String, String>> {
    let mut chains = BTreeMap::new();
    for entry in split_list(list) {
        let Some((chain_id, prefix)) = entry.split_once('=') else {
            bail!("KNOWN_CHAINS entry must be chain_id=prefix: {}", entry);
        };
        chains.insert(chain_id.trim().to_string(), prefix.trim().to_string());
    }
    Ok(chains)
}
