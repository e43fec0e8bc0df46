/// Session Manager - Orchestration Layer
///
/// Owns the application store and the connection orchestrator. Store access
/// is short and exclusive; a connection batch holds the batch lock (one
/// batch at a time) but releases the store while the wallet is asked, so
/// reads stay responsive during long approval prompts.
use std::sync::Arc;

use parityscan::common::{CommonAction, ErrorState, SelectedNetworkState};
use parityscan::store::{
    error_action, parse_wallet_kind, settle_connect, settle_single, AppAction, AppState, AppStore,
};
use parityscan::{
    ConnectError, ConnectOutcome, ConnectionOrchestrator, FileStore, LocalStore,
    NetworkDescriptor, SessionAction, SingleConnection, WalletAdapter, WalletSessionState,
};
use tokio::sync::Mutex;

use crate::api::types::ModesResponse;
use crate::bridge::HttpWalletBridge;
use crate::config::ServiceConfig;
use crate::error::ApiError;

pub struct SessionManager {
    pub config: ServiceConfig,
    store: Mutex<AppStore>,
    batch: Mutex<()>,
    orchestrator: ConnectionOrchestrator,
}

impl SessionManager {
    // ============================================================================
    // Constructor
    // ============================================================================

    /// Manager backed by the HTTP wallet bridge and a file store in `STATE_DIR`
    pub fn new(config: ServiceConfig) -> Result<Self, ApiError> {
        let local = Arc::new(FileStore::open(config.session.state_dir.clone())?);
        let bridge = Arc::new(HttpWalletBridge::new(&config.bridge_url));
        Self::with_adapter(config, bridge, local)
    }

    /// Create SessionManager with a custom adapter and local store (for testing)
    pub fn with_adapter(
        config: ServiceConfig,
        adapter: Arc<dyn WalletAdapter>,
        local: Arc<dyn LocalStore>,
    ) -> Result<Self, ApiError> {
        let store = AppStore::new(&config.session, local.clone())?;
        let orchestrator = ConnectionOrchestrator::new(adapter, local, &config.session);

        Ok(Self {
            config,
            store: Mutex::new(store),
            batch: Mutex::new(()),
            orchestrator,
        })
    }

    // ============================================================================
    // Connection
    // ============================================================================

    pub async fn connect(
        &self,
        wallet_name: &str,
        chain_ids: Option<&[String]>,
    ) -> Result<ConnectOutcome, ApiError> {
        let _batch = self.batch.lock().await;

        let (registry, networks, kind) = {
            let mut store = self.store.lock().await;
            store.dispatch(AppAction::Wallet(SessionAction::ConnectStarted));
            match parse_wallet_kind(wallet_name) {
                Ok(kind) => (store.registry().clone(), store.networks_for(chain_ids), kind),
                Err(err) => {
                    let result: Result<ConnectOutcome, ConnectError> = Err(err);
                    store.dispatch_all(settle_connect(&result));
                    return result.map_err(ApiError::from);
                }
            }
        };

        log::info!("🔗 Connecting {} to {} networks", kind, networks.len());
        let result = self.orchestrator.connect(&registry, &networks, kind).await;

        self.store
            .lock()
            .await
            .dispatch_all(settle_connect(&result));

        let outcome = result?;
        log::info!(
            "✅ Connected {} to {} networks ({} failed)",
            kind,
            outcome.chain_infos.len(),
            outcome.failures().count()
        );
        Ok(outcome)
    }

    pub async fn connect_single(
        &self,
        wallet_name: &str,
        chain_id: &str,
    ) -> Result<Option<SingleConnection>, ApiError> {
        let _batch = self.batch.lock().await;

        let (network, kind) = {
            let mut store = self.store.lock().await;
            let kind = match parse_wallet_kind(wallet_name) {
                Ok(kind) => kind,
                Err(err) => {
                    store.dispatch(error_action(&err));
                    return Err(err.into());
                }
            };
            let network = store
                .registry()
                .get(chain_id)
                .cloned()
                .ok_or_else(|| ApiError::NetworkNotFound(chain_id.to_string()))?;
            (network, kind)
        };

        let result = self.orchestrator.connect_single(&network, kind).await;

        self.store
            .lock()
            .await
            .dispatch_all(settle_single(&result, kind));
        Ok(result?)
    }

    /// Reconnect the wallet left connected by a previous run, if any
    pub async fn restore_session(&self) -> Option<ConnectOutcome> {
        let kind = self.store.lock().await.stored_wallet()?;
        log::info!("♻️  Restoring previous {} session", kind);
        match self.connect(kind.as_str(), None).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log::warn!("Could not restore {} session: {}", kind, e);
                None
            }
        }
    }

    /// Waits for a running batch so its settle cannot reconnect afterwards
    pub async fn disconnect(&self) -> WalletSessionState {
        let _batch = self.batch.lock().await;
        let mut store = self.store.lock().await;
        store.disconnect();
        store.state().wallet.clone()
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub async fn state(&self) -> AppState {
        self.store.lock().await.state().clone()
    }

    pub async fn networks(&self) -> Vec<NetworkDescriptor> {
        self.store.lock().await.registry().networks().to_vec()
    }

    pub async fn selected_network(&self) -> SelectedNetworkState {
        self.store
            .lock()
            .await
            .state()
            .common
            .selected_network
            .clone()
    }

    pub async fn modes(&self) -> ModesResponse {
        let store = self.store.lock().await;
        ModesResponse {
            authz: store.state().authz.clone(),
            feegrant: store.state().feegrant.clone(),
        }
    }

    pub async fn error(&self) -> ErrorState {
        self.store.lock().await.state().common.err_state.clone()
    }

    // ============================================================================
    // Navigation and network selection
    // ============================================================================

    pub async fn navigate(&self, path: &str) -> SelectedNetworkState {
        let mut store = self.store.lock().await;
        let selected = store.handle_route_change(path).clone();
        log::debug!("Route {} selects {:?}", path, selected.chain_id);
        selected
    }

    pub async fn select_network(&self, chain_name: &str) -> SelectedNetworkState {
        self.store.lock().await.select_network(chain_name).clone()
    }

    pub async fn add_custom_network(&self, network: NetworkDescriptor) -> Result<(), ApiError> {
        self.store.lock().await.add_custom_network(network)?;
        Ok(())
    }

    pub async fn reset_error(&self) {
        self.store
            .lock()
            .await
            .dispatch(AppAction::Common(CommonAction::ResetError));
    }
}
