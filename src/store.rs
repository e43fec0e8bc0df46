//! Application store
//!
//! Combines the wallet session, common, authz and feegrant slices. State is
//! only changed through [`AppStore::dispatch`]. Connection flows are split
//! into "start" and "settle" action lists so callers that keep the store
//! behind a lock can release it while the wallet is being asked.

use std::sync::Arc;

use serde::Serialize;

use crate::adapter::WalletKind;
use crate::common::{self, CommonAction, CommonState, SelectedNetworkState};
use crate::config::SessionConfig;
use crate::error::{ConnectError, RegistryError};
use crate::local_store::{LocalState, LocalStore};
use crate::modes::{
    reduce_authz, reduce_feegrant, AuthzAction, AuthzState, FeegrantAction, FeegrantState,
};
use crate::network::{builtin_networks, NetworkDescriptor, NetworkRegistry};
use crate::orchestrator::{
    ConnectOutcome, ConnectionOrchestrator, SessionEvent, SingleConnection,
};
use crate::route;
use crate::session::{self, SessionAction, WalletSessionState};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub wallet: WalletSessionState,
    pub common: CommonState,
    pub authz: AuthzState,
    pub feegrant: FeegrantState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Wallet(SessionAction),
    Common(CommonAction),
    Authz(AuthzAction),
    Feegrant(FeegrantAction),
}

pub fn reduce(state: AppState, action: AppAction) -> AppState {
    let AppState {
        wallet,
        common,
        authz,
        feegrant,
    } = state;
    match action {
        AppAction::Wallet(action) => AppState {
            wallet: session::reduce(wallet, action),
            common,
            authz,
            feegrant,
        },
        AppAction::Common(action) => AppState {
            common: common::reduce(common, action, &wallet.name_to_chain_ids),
            wallet,
            authz,
            feegrant,
        },
        AppAction::Authz(action) => AppState {
            authz: reduce_authz(authz, action),
            wallet,
            common,
            feegrant,
        },
        AppAction::Feegrant(action) => AppState {
            feegrant: reduce_feegrant(feegrant, action),
            wallet,
            common,
            authz,
        },
    }
}

/// Parse a wallet name; unknown wallets count as not installed
pub fn parse_wallet_kind(wallet_name: &str) -> Result<WalletKind, ConnectError> {
    wallet_name
        .parse()
        .map_err(|_| ConnectError::WalletNotInstalled(wallet_name.to_string()))
}

/// Error display action for a fatal connection error
pub fn error_action(err: &ConnectError) -> AppAction {
    AppAction::Common(CommonAction::SetError {
        kind: "error".to_string(),
        message: err.user_message().to_string(),
    })
}

/// Actions that settle a finished connection batch
pub fn settle_connect(result: &Result<ConnectOutcome, ConnectError>) -> Vec<AppAction> {
    match result {
        Ok(outcome) => {
            let mut actions = vec![AppAction::Wallet(SessionAction::ConnectSucceeded(
                Box::new(outcome.clone()),
            ))];
            for event in &outcome.events {
                actions.push(match event {
                    SessionEvent::ActivateAuthzMode(address) => {
                        AppAction::Authz(AuthzAction::EnableAuthzMode {
                            address: address.clone(),
                        })
                    }
                    SessionEvent::ActivateFeegrantMode(address) => {
                        AppAction::Feegrant(FeegrantAction::EnableFeegrantMode {
                            address: address.clone(),
                        })
                    }
                });
            }
            actions
        }
        Err(err) => vec![error_action(err), AppAction::Wallet(SessionAction::ConnectFailed)],
    }
}

/// Actions that settle a single-network connection
pub fn settle_single(
    result: &Result<Option<SingleConnection>, ConnectError>,
    kind: WalletKind,
) -> Vec<AppAction> {
    match result {
        Ok(Some(single)) => vec![
            AppAction::Wallet(SessionAction::ChainAdded {
                chain_id: single.chain_id.clone(),
                chain_info: Box::new(single.chain_info.clone()),
                wallet_kind: kind,
            }),
            AppAction::Wallet(SessionAction::NameToChainIdAdded {
                chain_name: single.chain_name.clone(),
                chain_id: single.chain_id.clone(),
            }),
        ],
        Ok(None) => Vec::new(),
        Err(err) => vec![error_action(err)],
    }
}

pub struct AppStore {
    state: AppState,
    registry: NetworkRegistry,
    local: Arc<dyn LocalStore>,
    default_network: String,
}

impl AppStore {
    /// Build the registry (built-in, networks file, custom networks) and load it
    pub fn new(config: &SessionConfig, local: Arc<dyn LocalStore>) -> Result<Self, RegistryError> {
        let mut sources = builtin_networks();
        if let Some(ref path) = config.networks_file {
            sources.extend(NetworkRegistry::load_file(path)?);
        }
        sources.extend(local.custom_networks()?);

        let registry = NetworkRegistry::from_sources(sources);
        log::info!("Network registry ready with {} networks", registry.len());
        Ok(Self::with_registry(
            registry,
            local,
            config.default_network.clone(),
        ))
    }

    pub fn with_registry(
        registry: NetworkRegistry,
        local: Arc<dyn LocalStore>,
        default_network: String,
    ) -> Self {
        let mut store = Self {
            state: AppState::default(),
            registry,
            local,
            default_network,
        };
        let networks = store.registry.networks().to_vec();
        store.dispatch(AppAction::Common(CommonAction::SetAllNetworksInfo(networks)));
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    pub fn default_network(&self) -> &str {
        &self.default_network
    }

    pub fn dispatch(&mut self, action: AppAction) {
        log::trace!("dispatch {:?}", action);
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub fn dispatch_all<I: IntoIterator<Item = AppAction>>(&mut self, actions: I) {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Registry networks for `chain_ids` in request order, or all when `None`
    pub fn networks_for(&self, chain_ids: Option<&[String]>) -> Vec<NetworkDescriptor> {
        match chain_ids {
            None => self.registry.networks().to_vec(),
            Some(ids) => ids
                .iter()
                .filter_map(|id| {
                    let network = self.registry.get(id);
                    if network.is_none() {
                        log::warn!("Requested unknown network {}, skipping", id);
                    }
                    network.cloned()
                })
                .collect(),
        }
    }

    /// Wallet kind remembered from a previous session, if it was left connected
    pub fn stored_wallet(&self) -> Option<WalletKind> {
        match (self.local.is_connected(), self.local.wallet_name()) {
            (Ok(true), Ok(Some(name))) => name.parse().ok(),
            _ => None,
        }
    }

    /// Connect `wallet_name` to the given networks (all when `None`)
    pub async fn establish_wallet_connection(
        &mut self,
        orchestrator: &ConnectionOrchestrator,
        chain_ids: Option<&[String]>,
        wallet_name: &str,
    ) -> Result<ConnectOutcome, ConnectError> {
        self.dispatch(AppAction::Wallet(SessionAction::ConnectStarted));
        let result = match parse_wallet_kind(wallet_name) {
            Ok(kind) => {
                let networks = self.networks_for(chain_ids);
                orchestrator.connect(&self.registry, &networks, kind).await
            }
            Err(err) => Err(err),
        };
        self.dispatch_all(settle_connect(&result));
        result
    }

    /// Add one network to the session without touching existing bindings
    pub async fn establish_single_connection(
        &mut self,
        orchestrator: &ConnectionOrchestrator,
        chain_id: &str,
        wallet_name: &str,
    ) -> Result<Option<SingleConnection>, ConnectError> {
        let kind = match parse_wallet_kind(wallet_name) {
            Ok(kind) => kind,
            Err(err) => {
                self.dispatch(error_action(&err));
                return Err(err);
            }
        };
        let Some(network) = self.registry.get(chain_id).cloned() else {
            log::warn!("Network {} is not in the registry", chain_id);
            return Ok(None);
        };
        let result = orchestrator.connect_single(&network, kind).await;
        self.dispatch_all(settle_single(&result, kind));
        result
    }

    /// Reset the session and forget the durable connection flags
    pub fn disconnect(&mut self) {
        self.dispatch_all(disconnect_actions());
        if let Err(e) = self.local.clear_connection() {
            log::warn!("Failed to clear stored connection: {}", e);
        }
        log::info!("Wallet disconnected");
    }

    /// Recompute the selected network from a navigation path
    pub fn handle_route_change(&mut self, path: &str) -> &SelectedNetworkState {
        let chain_name = route::resolve_path(path, &self.default_network);
        self.select_network(&chain_name)
    }

    /// Explicit user network switch
    pub fn select_network(&mut self, chain_name: &str) -> &SelectedNetworkState {
        self.dispatch(AppAction::Common(CommonAction::SetSelectedNetwork {
            chain_name: chain_name.to_lowercase(),
        }));
        &self.state.common.selected_network
    }

    /// Persist a user network and make it available for connection
    pub fn add_custom_network(&mut self, mut network: NetworkDescriptor) -> Result<(), RegistryError> {
        NetworkRegistry::validate(&network)?;
        network.is_custom_network = true;
        self.local.save_custom_network(&network)?;
        log::info!("Added custom network {}", network.chain_id());
        self.registry.insert(network);
        let networks = self.registry.networks().to_vec();
        self.dispatch(AppAction::Common(CommonAction::SetAllNetworksInfo(networks)));
        Ok(())
    }
}

/// Actions applied on disconnect
pub fn disconnect_actions() -> Vec<AppAction> {
    vec![
        AppAction::Wallet(SessionAction::Disconnect),
        AppAction::Authz(AuthzAction::ExitAuthzMode),
        AppAction::Feegrant(FeegrantAction::ExitFeegrantMode),
    ]
}
