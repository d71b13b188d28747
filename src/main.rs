//! Sentinel - Discord moderation bot over the HTTP interactions webhook
//!
//! Discord POSTs signed interaction payloads to this service; Sentinel
//! verifies them, runs the moderation command and answers privately,
//! mirroring each successful action into an audit channel.

mod common;
mod config;
mod discord;
mod moderation;
mod server;

use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tracing::{error, info};

use config::{env::get_config_path, load_and_validate};
use discord::SerenityClient;
use server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Sentinel v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Check {} and the SENTINEL_* environment variables.", config_path);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Bind address: {}", config.server.bind_address);
    match config.discord.audit_channel_id {
        Some(id) => info!("  Audit channel: {}", id),
        None => info!("  Audit channel: disabled"),
    }

    let client = SerenityClient::new(
        config.discord.token().unwrap_or_default(),
        config.discord.application_id,
    )?;

    let bind_address = config.server.bind_address.clone();
    let app = server::router(AppState::new(config, Arc::new(client)));

    let listener = tokio::net::TcpListener::bind(&bind_address).await.map_err(|e| {
        error!("Failed to bind {}: {}", bind_address, e);
        e
    })?;
    info!("Listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
