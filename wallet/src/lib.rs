/// ParityScan wallet session service
///
/// Serves the session core over HTTP and talks to wallet extensions through
/// an HTTP wallet bridge.

pub mod api;
pub mod bridge;
pub mod config;
pub mod error;
pub mod manager;

pub use bridge::HttpWalletBridge;
pub use config::ServiceConfig;
pub use error::ApiError;
pub use manager::SessionManager;
