//! Main entry point for the contact service binary

use anyhow::Result;
use core_lib::{config::LogFormat, create_app_with_config, run_server, AppConfig, AppState};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging settings are needed before the full config is validated.
    let config = AppConfig::load();
    let (format, level) = match &config {
        Ok(config) => (config.logging.format, config.logging.level.clone()),
        Err(_) => (LogFormat::Pretty, "info".to_string()),
    };
    init_tracing(format, &level);

    let config = config.map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let state = AppState::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize contact pipeline: {}", e))?;

    info!("App: {} v{}", state.app_name, state.version);
    info!("Delivery mode: {}", state.contact.mode());

    let app = create_app_with_config(state, config);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat, level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{}={level},core_lib={level},tower_http={level}",
            env!("CARGO_CRATE_NAME").replace('-', "_"),
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(format == LogFormat::Json);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
