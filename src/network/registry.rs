//! Ordered registry of supported networks
//!
//! Built from the static list followed by the user's custom networks.
//! Later entries with a chain id already present replace the earlier entry
//! in its original position.

use std::fs;
use std::path::Path;

use super::descriptor::{
    Bech32Config, Bip44, ChainConfig, Currency, FeeCurrency, GasPriceStep, ModuleFlags,
    NetworkDescriptor,
};
use crate::error::RegistryError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkRegistry {
    networks: Vec<NetworkDescriptor>,
}

impl NetworkRegistry {
    /// Merge sources in order; duplicates override positionally
    pub fn from_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = NetworkDescriptor>,
    {
        let mut registry = Self::default();
        for network in sources {
            registry.insert(network);
        }
        registry
    }

    /// Load a JSON array of networks from disk
    pub fn load_file(path: &Path) -> Result<Vec<NetworkDescriptor>, RegistryError> {
        let contents = fs::read_to_string(path)?;
        let networks: Vec<NetworkDescriptor> = serde_json::from_str(&contents)?;
        for network in &networks {
            Self::validate(network)?;
        }
        log::info!("Loaded {} networks from {}", networks.len(), path.display());
        Ok(networks)
    }

    /// Reject networks without a chain id or chain name
    pub fn validate(network: &NetworkDescriptor) -> Result<(), RegistryError> {
        if network.chain_id().trim().is_empty() {
            return Err(RegistryError::InvalidNetwork(
                "chain id must not be empty".to_string(),
            ));
        }
        if network.chain_name().trim().is_empty() {
            return Err(RegistryError::InvalidNetwork(format!(
                "chain name must not be empty ({})",
                network.chain_id()
            )));
        }
        Ok(())
    }

    /// Insert or replace (by chain id) a network
    pub fn insert(&mut self, network: NetworkDescriptor) {
        match self
            .networks
            .iter()
            .position(|n| n.chain_id() == network.chain_id())
        {
            Some(index) => {
                log::debug!("Overriding network {}", network.chain_id());
                self.networks[index] = network;
            }
            None => self.networks.push(network),
        }
    }

    pub fn get(&self, chain_id: &str) -> Option<&NetworkDescriptor> {
        self.networks.iter().find(|n| n.chain_id() == chain_id)
    }

    pub fn contains(&self, chain_id: &str) -> bool {
        self.get(chain_id).is_some()
    }

    pub fn networks(&self) -> &[NetworkDescriptor] {
        &self.networks
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

/// Networks shipped with the dashboard
pub fn builtin_networks() -> Vec<NetworkDescriptor> {
    let prysm = Currency {
        coin_denom: "PRYSM".to_string(),
        coin_minimal_denom: "uprysm".to_string(),
        coin_decimals: 6,
    };

    vec![NetworkDescriptor {
        enable_modules: ModuleFlags {
            authz: true,
            feegrant: true,
            group: false,
        },
        amino_config: ModuleFlags::default(),
        supported_wallets: vec![
            "keplr".to_string(),
            "leap".to_string(),
            "cosmostation".to_string(),
        ],
        keplr_experimental: true,
        leap_experimental: true,
        is_testnet: true,
        gov_v1: false,
        is_custom_network: false,
        explorer_tx_hash_endpoint: "https://explorer.kleomedes.network/prysm/tx/".to_string(),
        config: ChainConfig {
            chain_id: "prysm-devnet-1".to_string(),
            chain_name: "PrysmDevnet".to_string(),
            rest: "https://prysm-testnet-api.synergynodes.com".to_string(),
            rpc: "https://prysm-testnet-rpc.synergynodes.com".to_string(),
            rest_uris: vec!["https://prysm-testnet-api.synergynodes.com".to_string()],
            rpc_uris: vec!["https://prysm-testnet-rpc.synergynodes.com".to_string()],
            currencies: vec![prysm.clone()],
            bech32_config: Bech32Config::from_account_prefix("prysm"),
            fee_currencies: vec![FeeCurrency {
                currency: prysm.clone(),
                gas_price_step: Some(GasPriceStep {
                    low: 0.0,
                    average: 0.0,
                    high: 0.0,
                }),
            }],
            bip44: Bip44 { coin_type: 118 },
            stake_currency: prysm,
            image: Some(
                "https://raw.githubusercontent.com/cosmos/chain-registry/master/testnets/prysmdevnet/images/prysm.svg"
                    .to_string(),
            ),
        },
    }]
}
