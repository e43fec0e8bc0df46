/// Deterministic key material
///
/// Every wallet kind gets one secp256k1 key derived from the seed, like a
/// real extension reusing one account across cosmos chains. Addresses are
/// the first 20 bytes of the sha256 of the compressed public key, bech32
/// encoded with the chain's account prefix.

use bech32::{Bech32, Hrp};
use parityscan::{KeyAddress, WalletKey, WalletKind};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid secret key: {0}")]
    Secret(#[from] secp256k1::Error),

    #[error("Invalid bech32 prefix: {0}")]
    Prefix(#[from] bech32::primitives::hrp::Error),

    #[error("Bech32 encoding failed: {0}")]
    Encode(#[from] bech32::EncodeError),
}

/// Compressed public key for `kind`
pub fn public_key(seed: &str, kind: WalletKind) -> Result<[u8; 33], KeyError> {
    let digest = Sha256::digest(format!("{}:{}", seed, kind).as_bytes());
    let secret = SecretKey::from_slice(&digest)?;
    let secp = Secp256k1::new();
    Ok(PublicKey::from_secret_key(&secp, &secret).serialize())
}

/// Key as reported by `getKey` on a chain with account prefix `prefix`
pub fn wallet_key(seed: &str, kind: WalletKind, prefix: &str) -> Result<WalletKey, KeyError> {
    let pub_key = public_key(seed, kind)?;
    let address: Vec<u8> = Sha256::digest(pub_key)[..20].to_vec();
    let hrp = Hrp::parse(prefix)?;
    let bech32_address = bech32::encode::<Bech32>(hrp, &address)?;
    log::debug!("{} key {} -> {}", kind, hex::encode(pub_key), bech32_address);

    Ok(WalletKey {
        name: format!("mock-{}", kind),
        algo: "secp256k1".to_string(),
        pub_key: pub_key.to_vec(),
        bech32_address,
        address: Some(KeyAddress::Bytes(address)),
        is_nano_ledger: false,
        is_keystone: false,
    })
}
