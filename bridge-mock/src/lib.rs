/// Wallet Bridge Mock Library
///
/// This crate provides both a standalone binary and library components
/// for simulating wallet extensions behind an HTTP bridge.

pub mod config;
pub mod handlers;
pub mod keys;
pub mod server;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use config::MockConfig;
pub use server::{create_router, run_server};
pub use state::MockState;
pub use types::*;
