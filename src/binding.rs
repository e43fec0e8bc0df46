//! Serializable wallet bindings
//!
//! Key material leaves the adapter as bytes. Before it enters session state
//! the public key becomes base64 text and byte addresses become hex text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::adapter::{KeyAddress, WalletKey};
use crate::network::NetworkDescriptor;

/// Resolved address/key material for one (wallet, chain) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBinding {
    pub chain_id: String,
    pub name: String,
    pub is_nano_ledger: bool,
    pub pub_key: String,
    pub bech32_address: String,
    pub is_keystone: bool,
    pub algo: String,
    pub address: String,
}

impl WalletBinding {
    pub fn from_key(chain_id: &str, key: &WalletKey) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            name: key.name.clone(),
            is_nano_ledger: key.is_nano_ledger,
            pub_key: STANDARD.encode(&key.pub_key),
            bech32_address: key.bech32_address.clone(),
            is_keystone: key.is_keystone,
            algo: key.algo.clone(),
            address: encode_address(key.address.as_ref()),
        }
    }

    /// Decode the stored public key back to bytes
    pub fn pub_key_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.pub_key)
    }
}

fn encode_address(address: Option<&KeyAddress>) -> String {
    match address {
        Some(KeyAddress::Bytes(bytes)) => hex::encode(bytes),
        Some(KeyAddress::Text(text)) => text.clone(),
        None => String::new(),
    }
}

/// A binding together with the network it was made for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub wallet_info: WalletBinding,
    pub network: NetworkDescriptor,
}
