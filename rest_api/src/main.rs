// rest_api/src/main.rs
// Standalone API server; `cardioguard-cli serve` runs the same thing.

use anyhow::{Context, Result};
use log::info;
use tokio::sync::oneshot;

use cardioguard_lib::config::load_app_config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = load_app_config(None).context("Failed to load configuration")?;
    info!(
        "Starting CardioGuard API on {}:{}",
        config.server.host, config.server.port
    );

    // Only Ctrl-C stops the standalone server.
    let (_shutdown_tx, shutdown_rx) = oneshot::channel();
    rest_api::start_server(config, shutdown_rx).await
}
