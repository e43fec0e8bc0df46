//! Network registry
//!
//! - `descriptor.rs` - per-chain configuration records
//! - `registry.rs` - ordered, override-by-chain-id collection

mod descriptor;
mod registry;

pub use descriptor::{
    is_well_formed_endpoint, normalize_chain_name, Bech32Config, Bip44, ChainConfig, Currency,
    FeeCurrency, GasPriceStep, ModuleFlags, NetworkDescriptor,
};
pub use registry::{builtin_networks, NetworkRegistry};

#[cfg(test)]
pub(crate) use descriptor::fixtures;
