//! Connection orchestrator
//!
//! Connects one wallet kind to an ordered list of networks. Networks are
//! processed strictly one after another because the wallet exposes a single
//! implicit session. A failing network is recorded and skipped; the batch
//! only fails when the wallet is missing or no network produced a binding.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapter::{WalletAdapter, WalletKind};
use crate::address::address_by_prefix;
use crate::binding::{ChainInfo, WalletBinding};
use crate::config::SessionConfig;
use crate::error::{AdapterError, ConnectError, NetworkFailure};
use crate::local_store::{LocalState, LocalStore};
use crate::network::{NetworkDescriptor, NetworkRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptOutcome {
    Pending,
    Success,
    Failure,
}

/// One network being resolved inside a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionAttempt {
    pub chain_id: String,
    pub chain_name: String,
    pub outcome: AttemptOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl ConnectionAttempt {
    fn new(network: &NetworkDescriptor) -> Self {
        Self {
            chain_id: network.chain_id().to_string(),
            chain_name: network.chain_name().to_string(),
            outcome: AttemptOutcome::Pending,
            failure_reason: None,
        }
    }
}

/// Signals for sibling state slices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "address", rename_all = "camelCase")]
pub enum SessionEvent {
    ActivateAuthzMode(String),
    ActivateFeegrantMode(String),
}

/// Result of a successful batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectOutcome {
    pub wallet_kind: WalletKind,
    pub chain_infos: BTreeMap<String, ChainInfo>,
    pub name_to_chain_ids: BTreeMap<String, String>,
    pub wallet_name: String,
    pub is_nano_ledger: bool,
    pub attempts: Vec<ConnectionAttempt>,
    pub events: Vec<SessionEvent>,
    pub connected_at: DateTime<Utc>,
}

impl ConnectOutcome {
    /// Attempts that did not produce a binding
    pub fn failures(&self) -> impl Iterator<Item = &ConnectionAttempt> {
        self.attempts
            .iter()
            .filter(|a| a.outcome == AttemptOutcome::Failure)
    }
}

/// Result of a single-network connection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleConnection {
    pub chain_id: String,
    pub chain_name: String,
    pub chain_info: ChainInfo,
}

pub struct ConnectionOrchestrator {
    adapter: Arc<dyn WalletAdapter>,
    local: Arc<dyn LocalStore>,
    adapter_timeout: Duration,
    unsupported_single_chain_ids: Vec<String>,
}

impl ConnectionOrchestrator {
    pub fn new(
        adapter: Arc<dyn WalletAdapter>,
        local: Arc<dyn LocalStore>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            adapter,
            local,
            adapter_timeout: config.adapter_timeout,
            unsupported_single_chain_ids: config.unsupported_single_chain_ids.clone(),
        }
    }

    /// Connect `kind` to every network in `networks`, in order.
    ///
    /// `registry` is the registry snapshot at connection time; networks it
    /// does not know are skipped.
    pub async fn connect(
        &self,
        registry: &NetworkRegistry,
        networks: &[NetworkDescriptor],
        kind: WalletKind,
    ) -> Result<ConnectOutcome, ConnectError> {
        if !self.installed(kind).await {
            log::warn!("Wallet {} is not installed", kind);
            return Err(ConnectError::WalletNotInstalled(kind.to_string()));
        }

        let chain_ids: Vec<String> = networks.iter().map(|n| n.chain_id().to_string()).collect();
        self.enable_chains(kind, &chain_ids).await;

        let mut attempts: Vec<ConnectionAttempt> =
            networks.iter().map(ConnectionAttempt::new).collect();
        let mut results: Vec<Result<WalletBinding, NetworkFailure>> =
            Vec::with_capacity(networks.len());

        for (network, attempt) in networks.iter().zip(attempts.iter_mut()) {
            let result = self.connect_network(registry, network, kind).await;
            match &result {
                Ok(binding) => {
                    log::info!(
                        "Connected {} on {} ({})",
                        kind,
                        network.chain_name(),
                        binding.bech32_address
                    );
                    attempt.outcome = AttemptOutcome::Success;
                }
                Err(failure) => {
                    log::warn!(
                        "unable to connect to network {}: {}",
                        network.chain_name(),
                        failure
                    );
                    attempt.outcome = AttemptOutcome::Failure;
                    attempt.failure_reason = Some(failure.to_string());
                }
            }
            results.push(result);
        }

        let mut chain_infos = BTreeMap::new();
        let mut name_to_chain_ids = BTreeMap::new();
        let mut first: Option<WalletBinding> = None;
        let mut any_address = String::new();

        for (network, result) in networks.iter().zip(results) {
            let Ok(binding) = result else { continue };
            if first.is_none() {
                first = Some(binding.clone());
            }
            if any_address.is_empty() {
                any_address = binding.bech32_address.clone();
            }
            name_to_chain_ids.insert(network.normalized_name(), network.chain_id().to_string());
            chain_infos.insert(
                network.chain_id().to_string(),
                ChainInfo {
                    wallet_info: binding,
                    network: network.clone(),
                },
            );
        }

        let Some(first) = first else {
            log::error!("Permission denied for all {} networks", networks.len());
            return Err(ConnectError::AllNetworksDenied);
        };

        self.persist_connection(kind);
        let events = self.stored_mode_events(&any_address);

        log::info!(
            "Wallet {} connected to {}/{} networks",
            kind,
            chain_infos.len(),
            networks.len()
        );

        Ok(ConnectOutcome {
            wallet_kind: kind,
            chain_infos,
            name_to_chain_ids,
            wallet_name: first.name,
            is_nano_ledger: first.is_nano_ledger,
            attempts,
            events,
            connected_at: Utc::now(),
        })
    }

    /// Connect a single network for wallets that bind one chain at a time.
    ///
    /// Returns `Ok(None)` when the chain is unsupported for this wallet or the
    /// wallet refused it; the caller keeps its existing bindings either way.
    pub async fn connect_single(
        &self,
        network: &NetworkDescriptor,
        kind: WalletKind,
    ) -> Result<Option<SingleConnection>, ConnectError> {
        if !self.installed(kind).await {
            log::warn!("Wallet {} is not installed", kind);
            return Err(ConnectError::WalletNotInstalled(kind.to_string()));
        }

        let chain_id = network.chain_id().to_string();
        self.enable_chains(kind, std::slice::from_ref(&chain_id)).await;

        if self.unsupported_single_chain_ids.contains(&chain_id) {
            log::info!("{} does not support {}, skipping", kind, chain_id);
            return Ok(None);
        }

        let key = match self
            .bounded(self.adapter.get_key(kind, &chain_id), NetworkFailure::GetKeyFailed)
            .await
        {
            Ok(key) => key,
            Err(failure) => {
                log::warn!(
                    "unable to connect to network {}: {}",
                    network.chain_name(),
                    failure
                );
                return Ok(None);
            }
        };

        let mut binding = WalletBinding::from_key(&chain_id, &key);
        binding.name = binding.bech32_address.clone();
        binding.is_nano_ledger = false;
        binding.is_keystone = false;

        self.persist_connection(kind);

        Ok(Some(SingleConnection {
            chain_id,
            chain_name: network.normalized_name(),
            chain_info: ChainInfo {
                wallet_info: binding,
                network: network.clone(),
            },
        }))
    }

    async fn connect_network(
        &self,
        registry: &NetworkRegistry,
        network: &NetworkDescriptor,
        kind: WalletKind,
    ) -> Result<WalletBinding, NetworkFailure> {
        let chain_id = network.chain_id();

        if !network.has_valid_rpc() {
            return Err(NetworkFailure::MalformedEndpoint {
                chain_name: network.chain_name().to_string(),
                rpc: network.config.rpc.clone(),
            });
        }

        if !registry.contains(chain_id) {
            return Err(NetworkFailure::UnknownNetwork(chain_id.to_string()));
        }

        if network.requires_suggestion(kind) {
            log::debug!("Suggesting experimental chain {} to {}", chain_id, kind);
            self.bounded(
                self.adapter.experimental_suggest_chain(kind, &network.config),
                NetworkFailure::SuggestChainFailed,
            )
            .await?;
        }

        let key = self
            .bounded(self.adapter.get_key(kind, chain_id), NetworkFailure::GetKeyFailed)
            .await?;

        Ok(WalletBinding::from_key(chain_id, &key))
    }

    async fn installed(&self, kind: WalletKind) -> bool {
        match tokio::time::timeout(self.adapter_timeout, self.adapter.is_installed(kind)).await {
            Ok(installed) => installed,
            Err(_) => {
                log::warn!("Wallet {} did not answer the install check", kind);
                false
            }
        }
    }

    /// Failures here are logged only; `get_key` reports per-chain denial
    async fn enable_chains(&self, kind: WalletKind, chain_ids: &[String]) {
        log::info!("Attempting to enable chains: {:?}", chain_ids);
        match tokio::time::timeout(self.adapter_timeout, self.adapter.enable(kind, chain_ids)).await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("Error enabling chains: {}", e),
            Err(_) => log::warn!(
                "Wallet {} did not answer enable within {}s",
                kind,
                self.adapter_timeout.as_secs()
            ),
        }
    }

    /// Run one adapter call under the configured timeout
    async fn bounded<T, F>(
        &self,
        call: F,
        wrap: fn(AdapterError) -> NetworkFailure,
    ) -> Result<T, NetworkFailure>
    where
        F: Future<Output = Result<T, AdapterError>>,
    {
        match tokio::time::timeout(self.adapter_timeout, call).await {
            Ok(result) => result.map_err(wrap),
            Err(_) => Err(NetworkFailure::Timeout(self.adapter_timeout.as_secs())),
        }
    }

    fn persist_connection(&self, kind: WalletKind) {
        if let Err(e) = self.local.set_connected() {
            log::warn!("Failed to persist connected flag: {}", e);
        }
        if let Err(e) = self.local.set_wallet_name(kind.as_str()) {
            log::warn!("Failed to persist wallet name: {}", e);
        }
    }

    /// Activation events for authz/feegrant modes stored for the cosmos address
    fn stored_mode_events(&self, any_address: &str) -> Vec<SessionEvent> {
        let Some(cosmos_address) = address_by_prefix(any_address, "cosmos") else {
            log::debug!("No cosmos address derivable from '{}'", any_address);
            return Vec::new();
        };

        let mut events = Vec::new();
        match self.local.authz_mode(&cosmos_address) {
            Ok(mode) if mode.is_authz_mode_on => {
                events.push(SessionEvent::ActivateAuthzMode(mode.authz_address))
            }
            Ok(_) => {}
            Err(e) => log::warn!("Failed to read authz mode: {}", e),
        }
        match self.local.feegrant_mode(&cosmos_address) {
            Ok(mode) if mode.is_feegrant_mode_on => {
                events.push(SessionEvent::ActivateFeegrantMode(mode.feegrant_address))
            }
            Ok(_) => {}
            Err(e) => log::warn!("Failed to read feegrant mode: {}", e),
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::fake::{key, FakeAdapter};
    use crate::address::test_address;
    use crate::local_store::{AuthzMode, FeegrantMode, MemoryStore};
    use crate::network::fixtures::network;

    fn networks() -> Vec<NetworkDescriptor> {
        vec![
            network("cosmoshub-4", "Cosmos Hub", "cosmos"),
            network("osmosis-1", "Osmosis", "osmo"),
            network("juno-1", "Juno", "juno"),
        ]
    }

    fn orchestrator(adapter: FakeAdapter) -> (ConnectionOrchestrator, Arc<FakeAdapter>, Arc<MemoryStore>) {
        let adapter = Arc::new(adapter);
        let local = Arc::new(MemoryStore::new());
        let config = SessionConfig {
            adapter_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let orchestrator = ConnectionOrchestrator::new(adapter.clone(), local.clone(), &config);
        (orchestrator, adapter, local)
    }

    #[tokio::test]
    async fn test_wallet_not_installed_does_no_work() {
        let (orchestrator, adapter, _) = orchestrator(FakeAdapter::default());
        let nets = networks();
        let registry = NetworkRegistry::from_sources(nets.clone());

        let err = orchestrator
            .connect(&registry, &nets, WalletKind::Keplr)
            .await
            .unwrap_err();
        assert_eq!(err, ConnectError::WalletNotInstalled("keplr".to_string()));
        assert!(adapter.calls().is_empty());
    }

    #[tokio::test]
    async fn test_partial_success_keeps_only_approved_chains() {
        let fake = FakeAdapter::with_wallet(WalletKind::Keplr)
            .approve("cosmoshub-4", key("alice", &test_address("cosmos", 1)))
            .approve("juno-1", key("alice", &test_address("juno", 1)));
        let (orchestrator, _, local) = orchestrator(fake);
        let nets = networks();
        let registry = NetworkRegistry::from_sources(nets.clone());

        let outcome = orchestrator
            .connect(&registry, &nets, WalletKind::Keplr)
            .await
            .unwrap();

        let keys: Vec<&str> = outcome.chain_infos.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["cosmoshub-4", "juno-1"]);
        assert_eq!(outcome.name_to_chain_ids.get("cosmoshub").map(String::as_str), Some("cosmoshub-4"));
        assert!(!outcome.name_to_chain_ids.contains_key("osmosis"));

        let failures: Vec<_> = outcome.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].chain_id, "osmosis-1");
        assert!(failures[0].failure_reason.is_some());

        assert!(local.is_connected().unwrap());
        assert_eq!(local.wallet_name().unwrap().as_deref(), Some("keplr"));
    }

    #[tokio::test]
    async fn test_all_denied_is_fatal_and_not_persisted() {
        let (orchestrator, _, local) = orchestrator(FakeAdapter::with_wallet(WalletKind::Leap));
        let nets = networks();
        let registry = NetworkRegistry::from_sources(nets.clone());

        let err = orchestrator
            .connect(&registry, &nets, WalletKind::Leap)
            .await
            .unwrap_err();
        assert_eq!(err, ConnectError::AllNetworksDenied);
        assert!(!local.is_connected().unwrap());
    }

    #[tokio::test]
    async fn test_malformed_endpoint_is_skipped_without_wallet_call() {
        let mut nets = networks();
        nets[1].config.rpc = "/osmosis-rpc".to_string();
        let fake = FakeAdapter::with_wallet(WalletKind::Keplr)
            .approve("cosmoshub-4", key("alice", &test_address("cosmos", 1)))
            .approve("osmosis-1", key("alice", &test_address("osmo", 1)));
        let (orchestrator, adapter, _) = orchestrator(fake);
        let registry = NetworkRegistry::from_sources(nets.clone());

        let outcome = orchestrator
            .connect(&registry, &nets, WalletKind::Keplr)
            .await
            .unwrap();

        assert!(!outcome.chain_infos.contains_key("osmosis-1"));
        assert!(!adapter.calls().contains(&"get_key:osmosis-1".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_network_is_rejected() {
        let nets = networks();
        let registry = NetworkRegistry::from_sources(nets[..1].to_vec());
        let fake = FakeAdapter::with_wallet(WalletKind::Keplr)
            .approve("cosmoshub-4", key("alice", &test_address("cosmos", 1)))
            .approve("osmosis-1", key("alice", &test_address("osmo", 1)));
        let (orchestrator, _, _) = orchestrator(fake);

        let outcome = orchestrator
            .connect(&registry, &nets, WalletKind::Keplr)
            .await
            .unwrap();
        assert_eq!(outcome.chain_infos.len(), 1);
        assert!(outcome.chain_infos.contains_key("cosmoshub-4"));
    }

    #[tokio::test]
    async fn test_suggest_chain_only_when_flagged_for_wallet() {
        let mut nets = networks();
        nets[0].keplr_experimental = true;
        nets[1].leap_experimental = true;
        let mut fake = FakeAdapter::with_wallet(WalletKind::Keplr)
            .approve("cosmoshub-4", key("alice", &test_address("cosmos", 1)))
            .approve("osmosis-1", key("alice", &test_address("osmo", 1)))
            .approve("juno-1", key("alice", &test_address("juno", 1)));
        fake.fail_suggest.insert("cosmoshub-4".to_string());
        let (orchestrator, adapter, _) = orchestrator(fake);
        let registry = NetworkRegistry::from_sources(nets.clone());

        let outcome = orchestrator
            .connect(&registry, &nets, WalletKind::Keplr)
            .await
            .unwrap();

        let calls = adapter.calls();
        assert!(calls.contains(&"suggest:cosmoshub-4".to_string()));
        assert!(!calls.contains(&"suggest:osmosis-1".to_string()));
        // a failed suggestion skips the chain before get_key
        assert!(!calls.contains(&"get_key:cosmoshub-4".to_string()));
        assert!(!outcome.chain_infos.contains_key("cosmoshub-4"));
        assert_eq!(outcome.chain_infos.len(), 2);
    }

    #[tokio::test]
    async fn test_first_success_sets_wallet_name() {
        let mut ledger = key("bob", &test_address("osmo", 2));
        ledger.is_nano_ledger = true;
        let fake = FakeAdapter::with_wallet(WalletKind::Keplr)
            .approve("osmosis-1", ledger)
            .approve("juno-1", key("carol", &test_address("juno", 3)));
        let (orchestrator, _, _) = orchestrator(fake);
        let nets = networks();
        let registry = NetworkRegistry::from_sources(nets.clone());

        let outcome = orchestrator
            .connect(&registry, &nets, WalletKind::Keplr)
            .await
            .unwrap();
        assert_eq!(outcome.wallet_name, "bob");
        assert!(outcome.is_nano_ledger);
    }

    #[tokio::test]
    async fn test_hung_wallet_call_times_out_softly() {
        let mut fake = FakeAdapter::with_wallet(WalletKind::Keplr)
            .approve("cosmoshub-4", key("alice", &test_address("cosmos", 1)))
            .approve("osmosis-1", key("alice", &test_address("osmo", 1)));
        fake.hang.insert("cosmoshub-4".to_string());
        let (orchestrator, _, _) = orchestrator(fake);
        let nets = networks();
        let registry = NetworkRegistry::from_sources(nets.clone());

        let outcome = orchestrator
            .connect(&registry, &nets, WalletKind::Keplr)
            .await
            .unwrap();
        assert_eq!(outcome.chain_infos.len(), 1);
        assert!(outcome.chain_infos.contains_key("osmosis-1"));
        assert_eq!(outcome.attempts[0].outcome, AttemptOutcome::Failure);
    }

    #[tokio::test]
    async fn test_enable_failure_is_ignored() {
        let mut fake = FakeAdapter::with_wallet(WalletKind::Keplr)
            .approve("cosmoshub-4", key("alice", &test_address("cosmos", 1)));
        fake.fail_enable = true;
        let (orchestrator, adapter, _) = orchestrator(fake);
        let nets = networks();
        let registry = NetworkRegistry::from_sources(nets.clone());

        let outcome = orchestrator
            .connect(&registry, &nets, WalletKind::Keplr)
            .await
            .unwrap();
        assert_eq!(outcome.chain_infos.len(), 1);
        assert_eq!(
            adapter.calls()[0],
            "enable:cosmoshub-4,osmosis-1,juno-1".to_string()
        );
    }

    #[tokio::test]
    async fn test_stored_modes_emit_activation_events() {
        let fake = FakeAdapter::with_wallet(WalletKind::Keplr)
            .approve("osmosis-1", key("alice", &test_address("osmo", 9)));
        let (orchestrator, _, local) = orchestrator(fake);
        let cosmos = test_address("cosmos", 9);
        local
            .set_authz_mode(
                &cosmos,
                &AuthzMode {
                    is_authz_mode_on: true,
                    authz_address: "cosmos1granter".to_string(),
                },
            )
            .unwrap();
        local
            .set_feegrant_mode(
                &cosmos,
                &FeegrantMode {
                    is_feegrant_mode_on: false,
                    feegrant_address: "cosmos1payer".to_string(),
                },
            )
            .unwrap();
        let nets = networks();
        let registry = NetworkRegistry::from_sources(nets.clone());

        let outcome = orchestrator
            .connect(&registry, &nets, WalletKind::Keplr)
            .await
            .unwrap();
        assert_eq!(
            outcome.events,
            vec![SessionEvent::ActivateAuthzMode("cosmos1granter".to_string())]
        );
    }

    #[tokio::test]
    async fn test_single_connection() {
        let fake = FakeAdapter::with_wallet(WalletKind::Metamask)
            .approve("cosmoshub-4", key("", &test_address("cosmos", 4)))
            .approve("injective-1", key("", &test_address("inj", 4)));
        let (orchestrator, _, local) = orchestrator(fake);

        let hub = network("cosmoshub-4", "Cosmos Hub", "cosmos");
        let single = orchestrator
            .connect_single(&hub, WalletKind::Metamask)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(single.chain_name, "cosmoshub");
        assert_eq!(single.chain_info.wallet_info.name, test_address("cosmos", 4));
        assert!(local.is_connected().unwrap());

        let injective = network("injective-1", "Injective", "inj");
        assert!(orchestrator
            .connect_single(&injective, WalletKind::Metamask)
            .await
            .unwrap()
            .is_none());

        let juno = network("juno-1", "Juno", "juno");
        assert!(orchestrator
            .connect_single(&juno, WalletKind::Metamask)
            .await
            .unwrap()
            .is_none());
    }
}
