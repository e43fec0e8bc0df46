/// Mutable mock wallet state
///
/// Chains learnt through `suggest-chain` are added to the known set; the
/// enabled set records which chains each wallet was asked to enable.

use parityscan::WalletKind;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use crate::config::MockConfig;

pub struct MockState {
    pub config: MockConfig,
    chains: RwLock<BTreeMap<String, String>>,
    enabled: RwLock<BTreeSet<(WalletKind, String)>>,
}

impl MockState {
    pub fn new(config: MockConfig) -> Self {
        let chains = RwLock::new(config.known_chains.clone());
        Self {
            config,
            chains,
            enabled: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn is_installed(&self, kind: WalletKind) -> bool {
        self.config.installed_wallets.contains(&kind)
    }

    pub fn is_denied(&self, chain_id: &str) -> bool {
        self.config.denied_chains.contains(chain_id)
    }

    /// Account prefix of a chain the wallet knows
    pub async fn prefix(&self, chain_id: &str) -> Option<String> {
        self.chains.read().await.get(chain_id).cloned()
    }

    pub async fn add_chain(&self, chain_id: &str, prefix: &str) {
        self.chains
            .write()
            .await
            .insert(chain_id.to_string(), prefix.to_string());
    }

    pub async fn enable(&self, kind: WalletKind, chain_id: &str) {
        self.enabled.write().await.insert((kind, chain_id.to_string()));
    }

    pub async fn is_enabled(&self, kind: WalletKind, chain_id: &str) -> bool {
        self.enabled
            .read()
            .await
            .contains(&(kind, chain_id.to_string()))
    }
}
