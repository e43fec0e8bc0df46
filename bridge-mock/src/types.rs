/// Wallet bridge request and response types
///
/// Keys and chain configs reuse the session core's wire types so the mock
/// and `HttpWalletBridge` cannot drift apart.

use serde::{Deserialize, Serialize};

pub use parityscan::{ChainConfig, WalletKey};

/// Response from /wallets/{kind}/installed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledResponse {
    pub installed: bool,
}

/// Body of POST /wallets/{kind}/enable
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableRequest {
    pub chain_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
