use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use wallet_bridge_mock::{create_router, MockConfig, MockState};

fn router() -> axum::Router {
    let mut config = MockConfig::default();
    config.denied_chains.insert("osmosis-1".to_string());
    create_router(Arc::new(MockState::new(config)))
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn chain_config(chain_id: &str, prefix: &str) -> Value {
    let currency = json!({
        "coinDenom": "TEST",
        "coinMinimalDenom": "utest",
        "coinDecimals": 6
    });
    json!({
        "chainId": chain_id,
        "chainName": chain_id,
        "rest": "https://rest.example",
        "rpc": "https://rpc.example",
        "currencies": [currency],
        "bech32Config": {
            "bech32PrefixAccAddr": prefix,
            "bech32PrefixAccPub": format!("{}pub", prefix),
            "bech32PrefixValAddr": format!("{}valoper", prefix),
            "bech32PrefixValPub": format!("{}valoperpub", prefix),
            "bech32PrefixConsAddr": format!("{}valcons", prefix),
            "bech32PrefixConsPub": format!("{}valconspub", prefix)
        },
        "feeCurrencies": [currency],
        "bip44": { "coinType": 118 },
        "stakeCurrency": currency
    })
}

#[tokio::test]
async fn test_installed() {
    let router = router();

    let (status, body) = send(&router, get("/wallets/keplr/installed")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["installed"], true);

    let (_, body) = send(&router, get("/wallets/metamask/installed")).await;
    assert_eq!(body["installed"], false);

    let (_, body) = send(&router, get("/wallets/phantom/installed")).await;
    assert_eq!(body["installed"], false);
}

#[tokio::test]
async fn test_get_key_for_known_chain() {
    let router = router();

    let (status, body) = send(&router, get("/wallets/keplr/keys/cosmoshub-4")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["bech32Address"].as_str().unwrap().starts_with("cosmos1"));
    assert!(body["pubKey"].is_string());
    assert_eq!(body["address"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_unknown_chain_needs_suggestion() {
    let router = router();

    let (status, body) = send(&router, get("/wallets/keplr/keys/juno-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "There is no chain info for juno-1");

    let (status, _) = send(
        &router,
        post("/wallets/keplr/suggest-chain", chain_config("juno-1", "juno")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, get("/wallets/keplr/keys/juno-1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["bech32Address"].as_str().unwrap().starts_with("juno1"));
}

#[tokio::test]
async fn test_denied_and_missing_wallet() {
    let router = router();

    let (status, _) = send(&router, get("/wallets/keplr/keys/osmosis-1")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&router, get("/wallets/metamask/keys/cosmoshub-4")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enable_fails_on_unknown_chain() {
    let router = router();

    let (status, _) = send(
        &router,
        post("/wallets/leap/enable", json!({ "chainIds": ["cosmoshub-4"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &router,
        post(
            "/wallets/leap/enable",
            json!({ "chainIds": ["cosmoshub-4", "prysm-devnet-1"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "There is no chain info for prysm-devnet-1");
}
