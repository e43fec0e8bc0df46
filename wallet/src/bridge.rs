/// HTTP wallet bridge
///
/// Implements the wallet capability adapter against a wallet-extension
/// bridge speaking JSON over HTTP. Non-2xx replies carry `{ "error": msg }`.

use async_trait::async_trait;
use parityscan::{AdapterError, ChainConfig, WalletAdapter, WalletKey, WalletKind};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct InstalledResponse {
    installed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnableRequest<'a> {
    chain_ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct HttpWalletBridge {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWalletBridge {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Bridge URL with `segments` appended, each one percent-encoded
    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, AdapterError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            AdapterError::Transport(format!("bad bridge url {}: {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| AdapterError::Transport(format!("bad bridge url {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn wallet_url(&self, kind: WalletKind, segments: &[&str]) -> Result<reqwest::Url, AdapterError> {
        let mut path = vec!["wallets", kind.as_str()];
        path.extend_from_slice(segments);
        self.url(&path)
    }

    /// Ping the bridge
    pub async fn health(&self) -> bool {
        let url = match self.url(&["health"]) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Bridge health check failed: {}", e);
                return false;
            }
        };
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("Bridge health check failed: {}", e);
                false
            }
        }
    }
}

/// Map a bridge reply to `Ok(response)` or the matching adapter error
async fn check(response: reqwest::Response) -> Result<reqwest::Response, AdapterError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    Err(match status {
        StatusCode::NOT_FOUND => AdapterError::NotInstalled(message),
        StatusCode::FORBIDDEN => AdapterError::ConnectionDenied(message),
        StatusCode::BAD_REQUEST => AdapterError::Rejected(message),
        _ => AdapterError::Transport(message),
    })
}

fn transport(e: reqwest::Error) -> AdapterError {
    AdapterError::Transport(e.to_string())
}

#[async_trait]
impl WalletAdapter for HttpWalletBridge {
    async fn is_installed(&self, kind: WalletKind) -> bool {
        let sent = match self.wallet_url(kind, &["installed"]) {
            Ok(url) => self.client.get(url).send().await.map_err(transport),
            Err(e) => Err(e),
        };
        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Wallet bridge unreachable at {}: {}", self.base_url, e);
                return false;
            }
        };
        match check(response).await {
            Ok(response) => response
                .json::<InstalledResponse>()
                .await
                .map(|body| body.installed)
                .unwrap_or(false),
            Err(e) => {
                log::debug!("Install check for {} failed: {}", kind, e);
                false
            }
        }
    }

    async fn enable(&self, kind: WalletKind, chain_ids: &[String]) -> Result<(), AdapterError> {
        let response = self
            .client
            .post(self.wallet_url(kind, &["enable"])?)
            .json(&EnableRequest { chain_ids })
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn experimental_suggest_chain(
        &self,
        kind: WalletKind,
        config: &ChainConfig,
    ) -> Result<(), AdapterError> {
        let response = self
            .client
            .post(self.wallet_url(kind, &["suggest-chain"])?)
            .json(config)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn get_key(&self, kind: WalletKind, chain_id: &str) -> Result<WalletKey, AdapterError> {
        let response = self
            .client
            .get(self.wallet_url(kind, &["keys", chain_id])?)
            .send()
            .await
            .map_err(transport)?;
        check(response)
            .await?
            .json::<WalletKey>()
            .await
            .map_err(|e| AdapterError::InvalidResponse(e.to_string()))
    }
}
