use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parityscan::{ConnectError, RegistryError, StorageError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", .0.user_message())]
    Connect(#[from] ConnectError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network not found: {0}")]
    NetworkNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Connect(ConnectError::WalletNotInstalled(_)) => StatusCode::PRECONDITION_FAILED,
            ApiError::Connect(ConnectError::AllNetworksDenied) => StatusCode::FORBIDDEN,
            ApiError::Registry(RegistryError::InvalidNetwork(_)) => StatusCode::BAD_REQUEST,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NetworkNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
