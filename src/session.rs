//! Wallet session state and its reducer
//!
//! Mappings are only ever replaced wholesale (batch success) or extended by
//! one entry (single-network add); readers never see a half-applied update.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::adapter::WalletKind;
use crate::address::address_by_prefix;
use crate::binding::ChainInfo;
use crate::orchestrator::ConnectOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxStatus {
    #[default]
    Init,
    Pending,
    Idle,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSessionState {
    pub name: String,
    pub connect_wallet_open: bool,
    pub connected: bool,
    pub is_loading: bool,
    pub is_nano_ledger: bool,
    pub pub_key: String,
    pub wallet_kind: Option<WalletKind>,
    pub networks: BTreeMap<String, ChainInfo>,
    pub name_to_chain_ids: BTreeMap<String, String>,
    pub status: TxStatus,
}

impl Default for WalletSessionState {
    /// Loading until the first connection attempt settles
    fn default() -> Self {
        Self {
            name: String::new(),
            connect_wallet_open: false,
            connected: false,
            is_loading: true,
            is_nano_ledger: false,
            pub_key: String::new(),
            wallet_kind: None,
            networks: BTreeMap::new(),
            name_to_chain_ids: BTreeMap::new(),
            status: TxStatus::Init,
        }
    }
}

impl WalletSessionState {
    /// Bech32 address bound on `chain_id`, if connected there
    pub fn address(&self, chain_id: &str) -> Option<&str> {
        self.networks
            .get(chain_id)
            .map(|info| info.wallet_info.bech32_address.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    ConnectStarted,
    ConnectSucceeded(Box<ConnectOutcome>),
    ConnectFailed,
    ChainAdded {
        chain_id: String,
        chain_info: Box<ChainInfo>,
        wallet_kind: WalletKind,
    },
    NameToChainIdAdded {
        chain_name: String,
        chain_id: String,
    },
    Disconnect,
    ResetConnectStatus,
    SetLoading,
    UnsetLoading,
    SetConnectWalletOpen(bool),
}

pub fn reduce(mut state: WalletSessionState, action: SessionAction) -> WalletSessionState {
    match action {
        SessionAction::ConnectStarted => {
            state.status = TxStatus::Pending;
            state.is_loading = true;
        }
        SessionAction::ConnectSucceeded(outcome) => {
            let outcome = *outcome;
            state.networks = outcome.chain_infos;
            state.name_to_chain_ids = outcome.name_to_chain_ids;
            state.connected = true;
            state.is_nano_ledger = outcome.is_nano_ledger;
            state.name = outcome.wallet_name;
            state.wallet_kind = Some(outcome.wallet_kind);
            state.status = TxStatus::Idle;
            state.is_loading = false;
        }
        SessionAction::ConnectFailed => {
            state.status = TxStatus::Rejected;
            state.is_loading = false;
        }
        SessionAction::ChainAdded {
            chain_id,
            chain_info,
            wallet_kind,
        } => {
            if state.name.is_empty() {
                state.name = address_by_prefix(&chain_info.wallet_info.name, "cosmos")
                    .unwrap_or_default();
            }
            state.networks.insert(chain_id, *chain_info);
            state.connected = true;
            state.wallet_kind = Some(wallet_kind);
            state.is_loading = false;
            state.status = TxStatus::Idle;
        }
        SessionAction::NameToChainIdAdded {
            chain_name,
            chain_id,
        } => {
            state.name_to_chain_ids.insert(chain_name, chain_id);
        }
        SessionAction::Disconnect => {
            state = WalletSessionState::default();
        }
        SessionAction::ResetConnectStatus => {
            state.status = TxStatus::Init;
        }
        SessionAction::SetLoading => {
            state.is_loading = true;
        }
        SessionAction::UnsetLoading => {
            state.is_loading = false;
        }
        SessionAction::SetConnectWalletOpen(open) => {
            state.connect_wallet_open = open;
        }
    }
    state
}
