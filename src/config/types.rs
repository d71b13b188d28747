//! Configuration type definitions.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub discord: DiscordConfig,
    pub moderation: ModerationConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Discord application credentials.
///
/// Every field is optional at load time; accessors report a missing value
/// as a [`ConfigError`] at the point of use.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Hex-encoded Ed25519 public key of the application.
    pub public_key: Option<String>,
    pub token: Option<String>,
    pub application_id: Option<u64>,
    /// Channel receiving audit embeds. Auditing is off when unset.
    pub audit_channel_id: Option<u64>,
    /// Bearer secret guarding the command registration endpoint.
    pub setup_token: Option<String>,
}

impl DiscordConfig {
    pub fn public_key(&self) -> Result<&str, ConfigError> {
        required(self.public_key.as_deref(), "discord.public_key")
    }

    pub fn token(&self) -> Result<&str, ConfigError> {
        required(self.token.as_deref(), "discord.token")
    }

    pub fn setup_token(&self) -> Result<&str, ConfigError> {
        required(self.setup_token.as_deref(), "discord.setup_token")
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField {
            field: field.to_string(),
        }),
    }
}

/// Defaults applied when a command omits an option.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModerationConfig {
    pub default_timeout_minutes: u32,
    pub scan_window_minutes: u32,
    pub scan_message_limit: u8,
    /// Whether kicked members get a DM with the reason.
    pub notify_on_kick: bool,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            default_timeout_minutes: 10,
            scan_window_minutes: 60,
            scan_message_limit: 100,
            notify_on_kick: true,
        }
    }
}
