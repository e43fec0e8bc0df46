use parityscan::{AuthzState, FeegrantState, SingleConnection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub wallet_name: String,
    /// All registry networks when omitted
    #[serde(default)]
    pub chain_ids: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectSingleRequest {
    pub wallet_name: String,
    pub chain_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectSingleResponse {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<SingleConnection>,
}

#[derive(Debug, Deserialize)]
pub struct NavigationRequest {
    pub path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectNetworkRequest {
    pub chain_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModesResponse {
    pub authz: AuthzState,
    pub feegrant: FeegrantState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNetworkResponse {
    pub chain_id: String,
    pub status: String,
}
