//! Bech32 prefix conversion

use bech32::{Bech32, Hrp};

/// Re-encode a bech32 address under another human readable part.
///
/// Returns `None` when `address` is not valid bech32 or the prefix is invalid.
pub fn address_by_prefix(address: &str, prefix: &str) -> Option<String> {
    let (_, data) = bech32::decode(address).ok()?;
    let hrp = Hrp::parse(prefix).ok()?;
    bech32::encode::<Bech32>(hrp, &data).ok()
}

#[cfg(test)]
pub(crate) fn test_address(prefix: &str, fill: u8) -> String {
    let hrp = Hrp::parse(prefix).unwrap();
    bech32::encode::<Bech32>(hrp, &[fill; 20]).unwrap()
}
