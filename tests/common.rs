/// Shared helpers for session integration tests
///
/// `ScriptedWallet` answers like a browser wallet whose user approves a
/// fixed set of chains and records every call it receives.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bech32::{Bech32, Hrp};
use parityscan::network::{Bech32Config, Bip44, Currency, FeeCurrency, ModuleFlags};
use parityscan::{
    AdapterError, ChainConfig, NetworkDescriptor, WalletAdapter, WalletKey, WalletKind,
};

pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

pub fn network(chain_id: &str, chain_name: &str, prefix: &str) -> NetworkDescriptor {
    let currency = Currency {
        coin_denom: prefix.to_uppercase(),
        coin_minimal_denom: format!("u{}", prefix),
        coin_decimals: 6,
    };
    NetworkDescriptor {
        enable_modules: ModuleFlags {
            authz: true,
            feegrant: true,
            group: false,
        },
        amino_config: ModuleFlags::default(),
        supported_wallets: vec!["keplr".to_string()],
        keplr_experimental: true,
        leap_experimental: false,
        is_testnet: false,
        gov_v1: true,
        is_custom_network: false,
        explorer_tx_hash_endpoint: String::new(),
        config: ChainConfig {
            chain_id: chain_id.to_string(),
            chain_name: chain_name.to_string(),
            rest: format!("https://rest.{}.example", prefix),
            rpc: format!("https://rpc.{}.example", prefix),
            rest_uris: vec![],
            rpc_uris: vec![],
            currencies: vec![currency.clone()],
            bech32_config: Bech32Config::from_account_prefix(prefix),
            fee_currencies: vec![FeeCurrency {
                currency: currency.clone(),
                gas_price_step: None,
            }],
            bip44: Bip44 { coin_type: 118 },
            stake_currency: currency,
            image: None,
        },
    }
}

/// Bech32 address with a constant 20 byte payload
pub fn address(prefix: &str, fill: u8) -> String {
    let hrp = Hrp::parse(prefix).expect("valid prefix");
    bech32::encode::<Bech32>(hrp, &[fill; 20]).expect("encodable address")
}

#[derive(Default)]
pub struct ScriptedWallet {
    pub kind: Option<WalletKind>,
    pub approved: HashMap<String, WalletKey>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedWallet {
    pub fn new(kind: WalletKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Approve `chain_id` with an account named `name`
    pub fn approve(mut self, chain_id: &str, name: &str, prefix: &str) -> Self {
        let key = WalletKey {
            name: name.to_string(),
            algo: "secp256k1".to_string(),
            pub_key: vec![3u8; 33],
            bech32_address: address(prefix, 7),
            address: None,
            is_nano_ledger: false,
            is_keystone: false,
        };
        self.approved.insert(chain_id.to_string(), key);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl WalletAdapter for ScriptedWallet {
    async fn is_installed(&self, kind: WalletKind) -> bool {
        self.kind == Some(kind)
    }

    async fn enable(&self, _kind: WalletKind, chain_ids: &[String]) -> Result<(), AdapterError> {
        self.record(format!("enable {}", chain_ids.len()));
        Ok(())
    }

    async fn experimental_suggest_chain(
        &self,
        _kind: WalletKind,
        config: &ChainConfig,
    ) -> Result<(), AdapterError> {
        self.record(format!("suggest {}", config.chain_id));
        Ok(())
    }

    async fn get_key(&self, _kind: WalletKind, chain_id: &str) -> Result<WalletKey, AdapterError> {
        self.record(format!("key {}", chain_id));
        self.approved
            .get(chain_id)
            .cloned()
            .ok_or_else(|| AdapterError::Rejected("Request rejected".to_string()))
    }
}
