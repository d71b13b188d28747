//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `SENTINEL_DISCORD_PUBLIC_KEY` - Application public key (hex)
//! - `SENTINEL_DISCORD_TOKEN` - Bot token
//! - `SENTINEL_DISCORD_APPLICATION_ID` - Application id
//! - `SENTINEL_AUDIT_CHANNEL_ID` - Channel receiving audit embeds
//! - `SENTINEL_SETUP_TOKEN` - Bearer secret for command registration
//! - `SENTINEL_BIND_ADDRESS` - HTTP listen address

use std::env;

use tracing::warn;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "SENTINEL";

/// Apply environment variable overrides to a config.
///
/// Secrets are expected to come from the environment rather than the
/// config file.
pub fn apply_env_overrides(config: Config) -> Config {
    apply_overrides_from(config, |key| env::var(key).ok())
}

fn apply_overrides_from(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let var = |name: &str| lookup(&format!("{}_{}", ENV_PREFIX, name));

    if let Some(key) = var("DISCORD_PUBLIC_KEY") {
        config.discord.public_key = Some(key);
    }
    if let Some(token) = var("DISCORD_TOKEN") {
        config.discord.token = Some(token);
    }
    if let Some(token) = var("SETUP_TOKEN") {
        config.discord.setup_token = Some(token);
    }
    if let Some(address) = var("BIND_ADDRESS") {
        config.server.bind_address = address;
    }

    if let Some(id) = var("DISCORD_APPLICATION_ID") {
        match id.trim().parse() {
            Ok(id) => config.discord.application_id = Some(id),
            Err(_) => warn!("Ignoring {}_DISCORD_APPLICATION_ID: '{}' is not a valid id", ENV_PREFIX, id),
        }
    }
    if let Some(id) = var("AUDIT_CHANNEL_ID") {
        match id.trim().parse() {
            Ok(id) => config.discord.audit_channel_id = Some(id),
            Err(_) => warn!("Ignoring {}_AUDIT_CHANNEL_ID: '{}' is not a valid id", ENV_PREFIX, id),
        }
    }

    config
}

/// Check which secrets are absent or empty.
///
/// Returns the environment variable names an operator should set.
pub fn missing_secrets(config: &Config) -> Vec<String> {
    let mut missing = Vec::new();
    if config.discord.public_key().is_err() {
        missing.push(format!("{}_DISCORD_PUBLIC_KEY", ENV_PREFIX));
    }
    if config.discord.token().is_err() {
        missing.push(format!("{}_DISCORD_TOKEN", ENV_PREFIX));
    }
    if config.discord.application_id.is_none() {
        missing.push(format!("{}_DISCORD_APPLICATION_ID", ENV_PREFIX));
    }
    missing
}

/// Get the config file path from environment or use default.
///
/// Checks `SENTINEL_CONFIG` environment variable, otherwise returns "sentinel.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "sentinel.conf".to_string())
}
