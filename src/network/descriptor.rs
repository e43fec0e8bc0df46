//! Static description of a supported chain
//!
//! Field names follow the dashboard's network list JSON (camelCase), so a
//! `networks.json` exported from the frontend loads without conversion.

use serde::{Deserialize, Serialize};

use crate::adapter::WalletKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub coin_denom: String,
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasPriceStep {
    pub low: f64,
    pub average: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCurrency {
    #[serde(flatten)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_step: Option<GasPriceStep>,
}

/// Bech32 human readable parts used by the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    /// Derive the full prefix set from an account prefix, the way cosmos-sdk chains name them
    pub fn from_account_prefix(prefix: &str) -> Self {
        Self {
            bech32_prefix_acc_addr: prefix.to_string(),
            bech32_prefix_acc_pub: format!("{}pub", prefix),
            bech32_prefix_val_addr: format!("{}valoper", prefix),
            bech32_prefix_val_pub: format!("{}valoperpub", prefix),
            bech32_prefix_cons_addr: format!("{}valcons", prefix),
            bech32_prefix_cons_pub: format!("{}valconspub", prefix),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
}

/// Chain configuration as handed to wallets in `experimentalSuggestChain`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: String,
    pub chain_name: String,
    pub rest: String,
    pub rpc: String,
    #[serde(default, rename = "restURIs")]
    pub rest_uris: Vec<String>,
    #[serde(default, rename = "rpcURIs")]
    pub rpc_uris: Vec<String>,
    pub currencies: Vec<Currency>,
    pub bech32_config: Bech32Config,
    pub fee_currencies: Vec<FeeCurrency>,
    pub bip44: Bip44,
    pub stake_currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Module flags (authz, feegrant, group)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFlags {
    #[serde(default)]
    pub authz: bool,
    #[serde(default)]
    pub feegrant: bool,
    #[serde(default)]
    pub group: bool,
}

/// One supported network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    #[serde(default)]
    pub enable_modules: ModuleFlags,
    #[serde(default)]
    pub amino_config: ModuleFlags,
    #[serde(default)]
    pub supported_wallets: Vec<String>,
    #[serde(default)]
    pub keplr_experimental: bool,
    #[serde(default)]
    pub leap_experimental: bool,
    #[serde(default)]
    pub is_testnet: bool,
    #[serde(default)]
    pub gov_v1: bool,
    #[serde(default)]
    pub is_custom_network: bool,
    #[serde(default)]
    pub explorer_tx_hash_endpoint: String,
    pub config: ChainConfig,
}

impl NetworkDescriptor {
    pub fn chain_id(&self) -> &str {
        &self.config.chain_id
    }

    pub fn chain_name(&self) -> &str {
        &self.config.chain_name
    }

    /// Key used in name to chain id maps
    pub fn normalized_name(&self) -> String {
        normalize_chain_name(&self.config.chain_name)
    }

    /// Whether the primary RPC endpoint looks like an absolute URL
    pub fn has_valid_rpc(&self) -> bool {
        is_well_formed_endpoint(&self.config.rpc)
    }

    /// Whether `kind` must register this chain via `experimentalSuggestChain` first
    pub fn requires_suggestion(&self, kind: WalletKind) -> bool {
        match kind {
            WalletKind::Keplr | WalletKind::Cosmostation => self.keplr_experimental,
            WalletKind::Leap => self.leap_experimental,
            WalletKind::Metamask => false,
        }
    }
}

/// Lower-case the name and drop spaces: "Cosmos Hub" -> "cosmoshub"
pub fn normalize_chain_name(name: &str) -> String {
    name.to_lowercase().split(' ').collect()
}

pub fn is_well_formed_endpoint(endpoint: &str) -> bool {
    endpoint.starts_with("http://") || endpoint.starts_with("https://")
}


#[cfg(test)]
mod tests {
    use super::fixtures::network;
    use super::*;

    #[test]
    fn test_normalize_chain_name() {
        assert_eq!(normalize_chain_name("Cosmos Hub"), "cosmoshub");
        assert_eq!(normalize_chain_name("PrysmDevnet"), "prysmdevnet");
        assert_eq!(normalize_chain_name(""), "");
    }

    #[test]
    fn test_endpoint_shape() {
        assert!(is_well_formed_endpoint("https://rpc.cosmos.network"));
        assert!(is_well_formed_endpoint("http://localhost:26657"));
        assert!(!is_well_formed_endpoint("/prysm-rpc"));
        assert!(!is_well_formed_endpoint(""));
        assert!(!is_well_formed_endpoint("ws://node:26657"));
    }

    #[test]
    fn test_requires_suggestion_per_wallet() {
        let mut net = network("prysm-devnet-1", "PrysmDevnet", "prysm");
        net.keplr_experimental = true;
        assert!(net.requires_suggestion(WalletKind::Keplr));
        assert!(net.requires_suggestion(WalletKind::Cosmostation));
        assert!(!net.requires_suggestion(WalletKind::Leap));
        assert!(!net.requires_suggestion(WalletKind::Metamask));
    }

    #[test]
    fn test_deserialize_dashboard_shape() {
        let json = r#"{
            "enableModules": {"authz": true, "feegrant": false, "group": false},
            "keplrExperimental": true,
            "isTestnet": true,
            "logos": {"menu": "x"},
            "config": {
                "chainId": "prysm-devnet-1",
                "chainName": "PrysmDevnet",
                "rest": "/prysm-api",
                "rpc": "/prysm-rpc",
                "restURIs": ["/prysm-api", "https://prysm-testnet-api.synergynodes.com"],
                "currencies": [{"coinDenom": "PRYSM", "coinMinimalDenom": "uprysm", "coinDecimals": 6}],
                "bech32Config": {
                    "bech32PrefixAccAddr": "prysm",
                    "bech32PrefixAccPub": "prysmpub",
                    "bech32PrefixValAddr": "prysmvaloper",
                    "bech32PrefixValPub": "prysmvaloperpub",
                    "bech32PrefixConsAddr": "prysmvalcons",
                    "bech32PrefixConsPub": "prysmvalconspub"
                },
                "feeCurrencies": [{
                    "coinDenom": "PRYSM", "coinMinimalDenom": "uprysm", "coinDecimals": 6,
                    "gasPriceStep": {"low": 0, "average": 0, "high": 0}
                }],
                "bip44": {"coinType": 118},
                "stakeCurrency": {"coinDenom": "PRYSM", "coinMinimalDenom": "uprysm", "coinDecimals": 6}
            }
        }"#;

        let net: NetworkDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(net.chain_id(), "prysm-devnet-1");
        assert!(net.enable_modules.authz);
        assert!(!net.enable_modules.feegrant);
        assert!(net.is_testnet);
        assert!(!net.has_valid_rpc());
        assert_eq!(net.config.rest_uris.len(), 2);
        assert!(net.config.fee_currencies[0].gas_price_step.is_some());
    }
}
