/// Axum HTTP server setup and routing

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::state::MockState;

pub fn create_router(state: Arc<MockState>) -> Router {
    // Configure CORS to allow requests from the session service and tests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        
        // Wallet endpoints
        .route("/wallets/:kind/installed", get(get_installed))
        .route("/wallets/:kind/enable", post(enable_chains))
        .route("/wallets/:kind/suggest-chain", post(suggest_chain))
        .route("/wallets/:kind/keys/:chain_id", get(get_key))
        
        // Shared state
        .with_state(state)
        
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(state: Arc<MockState>, host: String, port: u16) -> anyhow::Result<()> {
    let installed: Vec<String> = state
        .config
        .installed_wallets
        .iter()
        .map(|kind| kind.to_string())
        .collect();
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("🚀 Wallet bridge mock listening on http://{}", addr);
    log::info!("👛 Installed wallets: {}", installed.join(", "));

    axum::serve(listener, app).await?;

    Ok(())
}
