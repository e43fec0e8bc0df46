//! Wallet capability adapter
//!
//! Contract between the connection orchestrator and an installed wallet
//! extension. The extension keeps one implicit active-chain session, so
//! callers must not issue concurrent requests against the same adapter.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AdapterError;
use crate::network::ChainConfig;

/// Supported wallet extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Keplr,
    Leap,
    Cosmostation,
    /// MetaMask with the Leap cosmos snap, connected one network at a time
    Metamask,
}

impl WalletKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keplr => "keplr",
            Self::Leap => "leap",
            Self::Cosmostation => "cosmostation",
            Self::Metamask => "metamask",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletKind {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keplr" => Ok(Self::Keplr),
            "leap" => Ok(Self::Leap),
            "cosmostation" => Ok(Self::Cosmostation),
            "metamask" => Ok(Self::Metamask),
            other => Err(AdapterError::NotInstalled(other.to_string())),
        }
    }
}

/// Raw address as returned by the wallet: some wallets hand back bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyAddress {
    Text(String),
    Bytes(Vec<u8>),
}

/// Key material returned by `getKey`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletKey {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub algo: String,
    #[serde(with = "base64_bytes")]
    pub pub_key: Vec<u8>,
    #[serde(default)]
    pub bech32_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<KeyAddress>,
    #[serde(default)]
    pub is_nano_ledger: bool,
    #[serde(default)]
    pub is_keystone: bool,
}

#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Whether the extension for `kind` is available
    async fn is_installed(&self, kind: WalletKind) -> bool;

    /// Ask the wallet to enable the given chains
    async fn enable(&self, kind: WalletKind, chain_ids: &[String]) -> Result<(), AdapterError>;

    /// Register a chain the wallet does not ship with
    async fn experimental_suggest_chain(
        &self,
        kind: WalletKind,
        config: &ChainConfig,
    ) -> Result<(), AdapterError>;

    /// Fetch the key bound to `chain_id`
    async fn get_key(&self, kind: WalletKind, chain_id: &str) -> Result<WalletKey, AdapterError>;
}

/// Serde helper: binary fields travel as standard base64 text
pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}
