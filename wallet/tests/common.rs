/// Common test utilities for session service integration tests
///
/// Starts a wallet bridge mock on an ephemeral port and a session manager
/// whose durable state lives in a temporary directory.

use std::sync::Arc;
use std::time::Duration;

use parityscan::NetworkDescriptor;
use parityscan_wallet::{ServiceConfig, SessionManager};
use serde_json::json;
use tempfile::TempDir;
use wallet_bridge_mock::{create_router, MockConfig, MockState};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serve a bridge mock on 127.0.0.1, returning its base URL
pub async fn spawn_bridge(config: MockConfig) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = create_router(Arc::new(MockState::new(config)));
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("Bridge mock stopped: {}", e);
        }
    });
    Ok(format!("http://{}", addr))
}

/// Test environment with automatic cleanup
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub config: ServiceConfig,
    pub manager: Arc<SessionManager>,
}

impl TestEnvironment {
    /// Manager with the built-in networks plus Cosmos Hub as a custom network
    pub async fn new(mock: MockConfig) -> anyhow::Result<Self> {
        init_logging();
        let temp_dir = TempDir::new()?;
        log::info!("📁 Test directory: {:?}", temp_dir.path());

        let mut config = ServiceConfig::default();
        config.bridge_url = spawn_bridge(mock).await?;
        config.session.state_dir = temp_dir.path().to_path_buf();
        config.session.adapter_timeout = Duration::from_secs(5);

        let manager = SessionManager::new(config.clone())?;
        manager.add_custom_network(cosmos_hub()).await?;

        Ok(Self {
            temp_dir,
            config,
            manager: Arc::new(manager),
        })
    }

    /// Second manager over the same state directory, as after a restart
    pub fn restart(&self) -> anyhow::Result<SessionManager> {
        Ok(SessionManager::new(self.config.clone())?)
    }
}

pub fn cosmos_hub() -> NetworkDescriptor {
    let atom = json!({
        "coinDenom": "ATOM",
        "coinMinimalDenom": "uatom",
        "coinDecimals": 6
    });
    serde_json::from_value(json!({
        "enableModules": { "authz": true, "feegrant": true, "group": false },
        "supportedWallets": ["keplr", "leap", "cosmostation"],
        "keplrExperimental": false,
        "leapExperimental": false,
        "isTestnet": false,
        "explorerTxHashEndpoint": "https://www.mintscan.io/cosmos/txs/",
        "config": {
            "chainId": "cosmoshub-4",
            "chainName": "Cosmos Hub",
            "rest": "https://api.cosmos.network",
            "rpc": "https://rpc.cosmos.network",
            "currencies": [atom],
            "bech32Config": {
                "bech32PrefixAccAddr": "cosmos",
                "bech32PrefixAccPub": "cosmospub",
                "bech32PrefixValAddr": "cosmosvaloper",
                "bech32PrefixValPub": "cosmosvaloperpub",
                "bech32PrefixConsAddr": "cosmosvalcons",
                "bech32PrefixConsPub": "cosmosvalconspub"
            },
            "feeCurrencies": [atom],
            "bip44": { "coinType": 118 },
            "stakeCurrency": atom
        }
    }))
    .expect("valid network descriptor")
}
