//! ParityScan: wallet session core for a multi-network Cosmos dashboard
//!
//! This crate connects a browser-style wallet to many Cosmos networks at
//! once and keeps the resulting session in a pure, reducer-driven store.
//!
//! # Architecture
//!
//! - **Connection Orchestrator**: walks the requested networks one by one,
//!   registers chains the wallet does not know, fetches one key per network
//!   and soft-fails per network
//! - **Wallet Adapter**: the injected wallet surface ([`WalletAdapter`])
//! - **State Store**: session, common, authz and feegrant slices updated only
//!   through dispatched actions
//! - **Route Resolver**: maps a navigation path to the selected chain name
//! - **Network Registry**: known networks keyed by chain id
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use parityscan::{AppStore, ConnectionOrchestrator, FileStore, SessionConfig};
//!
//! let config = SessionConfig::from_env();
//! let local = Arc::new(FileStore::open(config.state_dir.clone())?);
//! let mut store = AppStore::new(&config, local.clone())?;
//! let orchestrator = ConnectionOrchestrator::new(adapter, local, &config);
//!
//! store.establish_wallet_connection(&orchestrator, None, "keplr").await?;
//! store.handle_route_change("/staking/cosmoshub");
//! ```

// Public modules
pub mod adapter;
pub mod address;
pub mod binding;
pub mod common;
pub mod config;
pub mod error;
pub mod local_store;
pub mod modes;
pub mod network;
pub mod orchestrator;
pub mod route;
pub mod session;
pub mod store;

// Re-exports for convenience
pub use adapter::{KeyAddress, WalletAdapter, WalletKey, WalletKind};
pub use address::address_by_prefix;
pub use binding::{ChainInfo, WalletBinding};
pub use common::{CommonAction, CommonState, ErrorState, SelectedNetworkState};
pub use config::SessionConfig;
pub use error::{AdapterError, ConnectError, NetworkFailure, RegistryError, StorageError};
pub use local_store::{FileStore, LocalState, LocalStore, MemoryStore};
pub use modes::{AuthzAction, AuthzState, FeegrantAction, FeegrantState};
pub use network::{ChainConfig, NetworkDescriptor, NetworkRegistry};
pub use orchestrator::{
    AttemptOutcome, ConnectOutcome, ConnectionAttempt, ConnectionOrchestrator, SessionEvent,
    SingleConnection,
};
pub use route::{resolve, resolve_path};
pub use session::{SessionAction, TxStatus, WalletSessionState};
pub use store::{AppAction, AppState, AppStore};
