//! Durable local key-value state
//!
//! Holds the "wallet connected" flag, the active wallet kind, per-address
//! authz/feegrant modes and the user's custom networks.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::network::NetworkDescriptor;

const KEY_CONNECTED: &str = "connected";
const KEY_WALLET_NAME: &str = "walletName";
const KEY_CUSTOM_NETWORKS: &str = "customNetworks";
const PREFIX_AUTHZ_MODE: &str = "authzMode/";
const PREFIX_FEEGRANT_MODE: &str = "feegrantMode/";

pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Stored authz mode for one address: act on behalf of `authz_address`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthzMode {
    pub is_authz_mode_on: bool,
    pub authz_address: String,
}

/// Stored feegrant mode for one address: fees paid by `feegrant_address`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeegrantMode {
    pub is_feegrant_mode_on: bool,
    pub feegrant_address: String,
}

/// Typed accessors over any [`LocalStore`]
pub trait LocalState: LocalStore {
    fn set_connected(&self) -> Result<(), StorageError> {
        self.set(KEY_CONNECTED, "true")
    }

    fn is_connected(&self) -> Result<bool, StorageError> {
        Ok(self.get(KEY_CONNECTED)?.as_deref() == Some("true"))
    }

    fn set_wallet_name(&self, name: &str) -> Result<(), StorageError> {
        self.set(KEY_WALLET_NAME, name)
    }

    fn wallet_name(&self) -> Result<Option<String>, StorageError> {
        self.get(KEY_WALLET_NAME)
    }

    /// Forget the connected flag and wallet kind
    fn clear_connection(&self) -> Result<(), StorageError> {
        self.remove(KEY_CONNECTED)?;
        self.remove(KEY_WALLET_NAME)
    }

    fn authz_mode(&self, address: &str) -> Result<AuthzMode, StorageError> {
        read_json(self, &format!("{}{}", PREFIX_AUTHZ_MODE, address))
    }

    fn set_authz_mode(&self, address: &str, mode: &AuthzMode) -> Result<(), StorageError> {
        write_json(self, &format!("{}{}", PREFIX_AUTHZ_MODE, address), mode)
    }

    fn feegrant_mode(&self, address: &str) -> Result<FeegrantMode, StorageError> {
        read_json(self, &format!("{}{}", PREFIX_FEEGRANT_MODE, address))
    }

    fn set_feegrant_mode(&self, address: &str, mode: &FeegrantMode) -> Result<(), StorageError> {
        write_json(self, &format!("{}{}", PREFIX_FEEGRANT_MODE, address), mode)
    }

    fn custom_networks(&self) -> Result<Vec<NetworkDescriptor>, StorageError> {
        read_json(self, KEY_CUSTOM_NETWORKS)
    }

    /// Add or replace (by chain id) a custom network
    fn save_custom_network(&self, network: &NetworkDescriptor) -> Result<(), StorageError> {
        let mut networks = self.custom_networks()?;
        match networks
            .iter()
            .position(|n| n.chain_id() == network.chain_id())
        {
            Some(index) => networks[index] = network.clone(),
            None => networks.push(network.clone()),
        }
        write_json(self, KEY_CUSTOM_NETWORKS, &networks)
    }
}

impl<T: LocalStore + ?Sized> LocalState for T {}

fn read_json<S, T>(store: &S, key: &str) -> Result<T, StorageError>
where
    S: LocalStore + ?Sized,
    T: for<'de> Deserialize<'de> + Default,
{
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(T::default()),
    }
}

fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: LocalStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

fn lock(entries: &Mutex<BTreeMap<String, String>>) -> MutexGuard<'_, BTreeMap<String, String>> {
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory store, state is lost on drop
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// JSON file backed store, written through on every change
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or start) the store at `dir/local_state.json`
    pub fn open(dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&dir)?;
        let path = dir.join("local_state.json");
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            BTreeMap::new()
        };
        log::debug!("Opened local state at {}", path.display());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    // memory only changes once the file write went through
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = lock(&self.entries);
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = lock(&self.entries);
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut updated = entries.clone();
        updated.remove(key);
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }
}
