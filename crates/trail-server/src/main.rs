//! Trail Server - Main entry point

use anyhow::Result;
use tracing::info;
use trail_common::logging::{init_logging, LogConfig};
use trail_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::builder()
        .log_file_prefix("trail-server")
        .filter_directives("trail_server=debug,tower_http=debug,sqlx=info")
        .build()
        .merge_env()?;

    // Dropping the guard stops the file writer
    let _log_guard = init_logging(&log_config)?;

    info!("Starting Trail Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await
}
