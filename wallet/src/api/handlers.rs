use axum::{extract::State, http::StatusCode, Json};
use parityscan::common::{ErrorState, SelectedNetworkState};
use parityscan::{AppState, ConnectOutcome, NetworkDescriptor, WalletSessionState};
use std::sync::Arc;

use super::types::{
    AddNetworkResponse, ConnectRequest, ConnectSingleRequest, ConnectSingleResponse,
    ModesResponse, NavigationRequest, SelectNetworkRequest,
};
use crate::error::ApiError;
use crate::manager::SessionManager;

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn connect_handler(
    State(manager): State<Arc<SessionManager>>,
    Json(req): Json<ConnectRequest>,
) -> Result<Json<ConnectOutcome>, ApiError> {
    let outcome = manager
        .connect(&req.wallet_name, req.chain_ids.as_deref())
        .await?;
    Ok(Json(outcome))
}

pub async fn connect_single_handler(
    State(manager): State<Arc<SessionManager>>,
    Json(req): Json<ConnectSingleRequest>,
) -> Result<Json<ConnectSingleResponse>, ApiError> {
    let connection = manager
        .connect_single(&req.wallet_name, &req.chain_id)
        .await?;

    Ok(Json(ConnectSingleResponse {
        connected: connection.is_some(),
        connection,
    }))
}

pub async fn disconnect_handler(
    State(manager): State<Arc<SessionManager>>,
) -> Json<WalletSessionState> {
    Json(manager.disconnect().await)
}

pub async fn get_state_handler(State(manager): State<Arc<SessionManager>>) -> Json<AppState> {
    Json(manager.state().await)
}

pub async fn list_networks_handler(
    State(manager): State<Arc<SessionManager>>,
) -> Json<Vec<NetworkDescriptor>> {
    Json(manager.networks().await)
}

pub async fn add_network_handler(
    State(manager): State<Arc<SessionManager>>,
    Json(network): Json<NetworkDescriptor>,
) -> Result<(StatusCode, Json<AddNetworkResponse>), ApiError> {
    let chain_id = network.chain_id().to_string();
    manager.add_custom_network(network).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddNetworkResponse {
            chain_id,
            status: "added".to_string(),
        }),
    ))
}

pub async fn navigation_handler(
    State(manager): State<Arc<SessionManager>>,
    Json(req): Json<NavigationRequest>,
) -> Json<SelectedNetworkState> {
    Json(manager.navigate(&req.path).await)
}

pub async fn select_network_handler(
    State(manager): State<Arc<SessionManager>>,
    Json(req): Json<SelectNetworkRequest>,
) -> Result<Json<SelectedNetworkState>, ApiError> {
    if req.chain_name.trim().is_empty() {
        return Err(ApiError::InvalidInput("chainName must not be empty".to_string()));
    }
    Ok(Json(manager.select_network(&req.chain_name).await))
}

pub async fn get_selected_network_handler(
    State(manager): State<Arc<SessionManager>>,
) -> Json<SelectedNetworkState> {
    Json(manager.selected_network().await)
}

pub async fn get_modes_handler(State(manager): State<Arc<SessionManager>>) -> Json<ModesResponse> {
    Json(manager.modes().await)
}

pub async fn get_error_handler(State(manager): State<Arc<SessionManager>>) -> Json<ErrorState> {
    Json(manager.error().await)
}

pub async fn reset_error_handler(State(manager): State<Arc<SessionManager>>) -> StatusCode {
    manager.reset_error().await;
    StatusCode::NO_CONTENT
}
