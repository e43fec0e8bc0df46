use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::bridge::HttpWalletBridge;
use crate::config::ServiceConfig;
use crate::manager::SessionManager;

pub fn create_router(manager: Arc<SessionManager>) -> Router {
    // Set ALLOWED_ORIGINS="https://your-app.example,https://preview.example" for production
    let cors = match manager.config.allowed_origins.as_deref() {
        Some(origins) => {
            log::info!("CORS configured for origins: {}", origins);
            let origin_list: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| match s.trim().parse() {
                    Ok(origin) => Some(origin),
                    Err(_) => {
                        log::warn!("Ignoring invalid CORS origin: {}", s.trim());
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => {
            log::warn!("CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS env var for production.");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route("/health", get(handlers::health_check))
        // Wallet session routes
        .route("/api/wallet/connect", post(handlers::connect_handler))
        .route(
            "/api/wallet/connect-single",
            post(handlers::connect_single_handler),
        )
        .route("/api/wallet/disconnect", post(handlers::disconnect_handler))
        .route("/api/wallet/state", get(handlers::get_state_handler))
        // Network routes
        .route("/api/networks", get(handlers::list_networks_handler))
        .route("/api/networks/custom", post(handlers::add_network_handler))
        .route("/api/navigation", post(handlers::navigation_handler))
        .route("/api/network/select", post(handlers::select_network_handler))
        .route(
            "/api/network/selected",
            get(handlers::get_selected_network_handler),
        )
        // Modes and error display
        .route("/api/modes", get(handlers::get_modes_handler))
        .route(
            "/api/error",
            get(handlers::get_error_handler).delete(handlers::reset_error_handler),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(manager)
}

pub async fn start_server(config: ServiceConfig) -> anyhow::Result<()> {
    let addr = config.bind_address.clone();

    if HttpWalletBridge::new(&config.bridge_url).health().await {
        log::info!("Wallet bridge reachable at {}", config.bridge_url);
    } else {
        log::warn!(
            "Wallet bridge at {} is not answering; connections will fail until it is up",
            config.bridge_url
        );
    }

    let manager = Arc::new(SessionManager::new(config)?);

    if let Some(outcome) = manager.restore_session().await {
        log::info!("Restored session on {} networks", outcome.chain_infos.len());
    }

    let app = create_router(manager);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
}
