/// Axum HTTP handlers for the wallet bridge endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parityscan::WalletKind;
use serde_json::json;
use std::sync::Arc;

use crate::keys;
use crate::state::MockState;
use crate::types::*;

/// Shared application state
pub type AppState = Arc<MockState>;

/// Custom error type for handlers
pub enum ApiError {
    NotInstalled(String),
    Denied(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotInstalled(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Denied(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<keys::KeyError> for ApiError {
    fn from(err: keys::KeyError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Resolve the path's wallet kind, failing unless it is installed
fn installed_kind(state: &MockState, kind: &str) -> Result<WalletKind, ApiError> {
    match kind.parse::<WalletKind>() {
        Ok(kind) if state.is_installed(kind) => Ok(kind),
        _ => Err(ApiError::NotInstalled(format!("{} is not installed", kind))),
    }
}

fn no_chain_info(chain_id: &str) -> ApiError {
    ApiError::BadRequest(format!("There is no chain info for {}", chain_id))
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /wallets/{kind}/installed
pub async fn get_installed(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Json<InstalledResponse> {
    let installed = installed_kind(&state, &kind).is_ok();
    Json(InstalledResponse { installed })
}

/// POST /wallets/{kind}/enable
/// Fails as a whole if any chain is unknown or denied
pub async fn enable_chains(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(req): Json<EnableRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let kind = installed_kind(&state, &kind)?;

    for chain_id in &req.chain_ids {
        if state.prefix(chain_id).await.is_none() {
            return Err(no_chain_info(chain_id));
        }
        if state.is_denied(chain_id) {
            return Err(ApiError::Denied("Request rejected".to_string()));
        }
    }
    for chain_id in &req.chain_ids {
        state.enable(kind, chain_id).await;
    }

    log::info!("{} enabled {} chains", kind, req.chain_ids.len());
    Ok(Json(StatusResponse {
        status: "enabled".to_string(),
    }))
}

/// POST /wallets/{kind}/suggest-chain
/// Registers the chain with its account prefix
pub async fn suggest_chain(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(config): Json<ChainConfig>,
) -> Result<Json<StatusResponse>, ApiError> {
    let kind = installed_kind(&state, &kind)?;

    if state.is_denied(&config.chain_id) {
        return Err(ApiError::Denied("Request rejected".to_string()));
    }
    state
        .add_chain(&config.chain_id, &config.bech32_config.bech32_prefix_acc_addr)
        .await;

    log::info!("{} accepted chain suggestion for {}", kind, config.chain_id);
    Ok(Json(StatusResponse {
        status: "added".to_string(),
    }))
}

/// GET /wallets/{kind}/keys/{chain_id}
pub async fn get_key(
    State(state): State<AppState>,
    Path((kind, chain_id)): Path<(String, String)>,
) -> Result<Json<WalletKey>, ApiError> {
    let kind = installed_kind(&state, &kind)?;

    let prefix = state
        .prefix(&chain_id)
        .await
        .ok_or_else(|| no_chain_info(&chain_id))?;
    if state.is_denied(&chain_id) {
        return Err(ApiError::Denied("Request rejected".to_string()));
    }
    if !state.is_enabled(kind, &chain_id).await {
        // approving the key request enables the chain
        state.enable(kind, &chain_id).await;
    }

    let key = keys::wallet_key(&state.config.key_seed, kind, &prefix)?;
    Ok(Json(key))
}
