use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use soundtouch_server::{init_logging, ApiServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Flags first, then SOUNDTOUCH_* environment variables, then defaults
    let config = ServerConfig::parse();

    init_logging(config.log_mode).context("Failed to initialize logging")?;

    let server = ApiServer::start(&config)
        .await
        .context("Failed to start SoundTouch server")?;

    match server.state().devices.current().await {
        Some(target) => info!("Controlling device at {}", target.base_url()),
        None => info!("No device configured; POST /device/configure to select one"),
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    info!("Shutting down");
    server.shutdown().await.context("Failed to stop server")?;

    Ok(())
}
