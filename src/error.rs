//! Error types for wallet session operations
//!
//! Fatal batch errors ([`ConnectError`]) are surfaced to the caller and the
//! error display slice. Per-network failures ([`NetworkFailure`]) are soft:
//! they are recorded on the connection attempt and never abort a batch.

use thiserror::Error;

/// Message shown when the requested wallet extension is missing
pub const ERR_WALLET_NOT_INSTALLED: &str = "Wallet is not installed";

/// Message shown when no network produced a binding
pub const ERR_ALL_NETWORKS_DENIED: &str = "Permission denied for all the networks";

/// Fatal outcome of a connection batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Wallet is not installed: {0}")]
    WalletNotInstalled(String),

    #[error("Permission denied for all the networks")]
    AllNetworksDenied,
}

impl ConnectError {
    /// Human readable message for the error display slice
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::WalletNotInstalled(_) => ERR_WALLET_NOT_INSTALLED,
            Self::AllNetworksDenied => ERR_ALL_NETWORKS_DENIED,
        }
    }
}

/// Soft failure for one network inside a batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkFailure {
    #[error("Invalid RPC URL for {chain_name}: {rpc}")]
    MalformedEndpoint { chain_name: String, rpc: String },

    #[error("Network {0} is not in the registry")]
    UnknownNetwork(String),

    #[error("Suggest chain failed: {0}")]
    SuggestChainFailed(AdapterError),

    #[error("Get key failed: {0}")]
    GetKeyFailed(AdapterError),

    #[error("Wallet did not respond within {0} seconds")]
    Timeout(u64),
}

/// Errors returned by a wallet capability adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("Wallet not installed: {0}")]
    NotInstalled(String),

    #[error("Connection denied: {0}")]
    ConnectionDenied(String),

    #[error("Request rejected by wallet: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response from wallet: {0}")]
    InvalidResponse(String),
}

/// Durable local state errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Network registry loading errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
