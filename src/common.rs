//! Common slice: error display, selected network, network catalogue

use std::collections::BTreeMap;

use serde::Serialize;

use crate::network::{normalize_chain_name, NetworkDescriptor};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorState {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Selected network, derived from the chain name and the known name maps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedNetworkState {
    pub chain_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    pub is_testnet: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonState {
    pub err_state: ErrorState,
    pub selected_network: SelectedNetworkState,
    pub all_networks_info: BTreeMap<String, NetworkDescriptor>,
    pub name_to_chain_ids: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommonAction {
    SetError { kind: String, message: String },
    ResetError,
    SetSelectedNetwork { chain_name: String },
    SetAllNetworksInfo(Vec<NetworkDescriptor>),
}

/// `wallet_names` is the wallet session's name map, consulted after the
/// catalogue's own map when selecting a network.
pub fn reduce(
    mut state: CommonState,
    action: CommonAction,
    wallet_names: &BTreeMap<String, String>,
) -> CommonState {
    match action {
        CommonAction::SetError { kind, message } => {
            state.err_state = ErrorState { message, kind };
        }
        CommonAction::ResetError => {
            state.err_state = ErrorState::default();
        }
        CommonAction::SetSelectedNetwork { chain_name } => {
            state.selected_network = select(&state, chain_name, wallet_names);
        }
        CommonAction::SetAllNetworksInfo(networks) => {
            // both maps describe the new catalogue only
            state.all_networks_info.clear();
            state.name_to_chain_ids.clear();
            for network in networks {
                state
                    .name_to_chain_ids
                    .insert(network.normalized_name(), network.chain_id().to_string());
                state
                    .all_networks_info
                    .insert(network.chain_id().to_string(), network);
            }
            // chain ids may have appeared since the last selection
            let chain_name = state.selected_network.chain_name.clone();
            state.selected_network = select(&state, chain_name, wallet_names);
        }
    }
    state
}

fn select(
    state: &CommonState,
    chain_name: String,
    wallet_names: &BTreeMap<String, String>,
) -> SelectedNetworkState {
    let key = normalize_chain_name(&chain_name);
    let chain_id = state
        .name_to_chain_ids
        .get(&key)
        .or_else(|| wallet_names.get(&key))
        .filter(|id| state.all_networks_info.contains_key(id.as_str()))
        .cloned();
    let is_testnet = chain_id
        .as_ref()
        .and_then(|id| state.all_networks_info.get(id))
        .map(|n| n.is_testnet)
        .unwrap_or(false);

    SelectedNetworkState {
        chain_name,
        chain_id,
        is_testnet,
    }
}
