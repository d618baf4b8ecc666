// agrareg server entrypoint
//!
//! The heavy lifting (initialization, route wiring, shutdown) lives in
//! dedicated modules so this file remains a thin orchestrator.

use agrareg_server::{config::ServerConfig, lifecycle, logging};
use anyhow::Result;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fallback to defaults when config file missing)
    let config_path = "config.toml";
    let config = match ServerConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: Failed to load {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!("agrareg server v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    let ctx = lifecycle::bootstrap(&config).await?;

    lifecycle::run(&config, ctx).await
}
