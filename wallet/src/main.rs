use parityscan_wallet::api::server;
use parityscan_wallet::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger (set RUST_LOG=debug for verbose output, RUST_LOG=info for normal)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env();

    log::info!(
        "Starting ParityScan wallet session server on {}",
        config.bind_address
    );
    server::start_server(config).await?;
    Ok(())
}
