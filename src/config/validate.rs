//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use crate::common::error::ConfigError;
use crate::config::types::Config;
use crate::moderation::{MAX_SCAN_WINDOW_MINUTES, MAX_TIMEOUT_MINUTES};

/// Validate a configuration and return detailed errors.
///
/// Absent secrets are not reported here; they surface when first used.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(format!(
            "server.bind_address '{}' is not a valid socket address",
            config.server.bind_address
        ));
    }

    // Validate Discord config
    if let Some(ref key) = config.discord.public_key {
        match hex::decode(key.trim()) {
            Ok(bytes) if bytes.len() == 32 => {}
            Ok(bytes) => errors.push(format!(
                "discord.public_key must be 32 bytes (got {})",
                bytes.len()
            )),
            Err(_) => errors.push("discord.public_key is not valid hex".to_string()),
        }
    }
    if config.discord.token.as_deref() == Some("YOUR_DISCORD_TOKEN_HERE") {
        errors.push("discord.token has not been configured (still using placeholder)".to_string());
    }
    if config.discord.application_id == Some(0) {
        errors.push("discord.application_id must be non-zero".to_string());
    }
    if config.discord.audit_channel_id == Some(0) {
        errors.push("discord.audit_channel_id must be non-zero".to_string());
    }

    // Validate moderation defaults
    let moderation = &config.moderation;
    if !(1..=MAX_TIMEOUT_MINUTES).contains(&moderation.default_timeout_minutes) {
        errors.push(format!(
            "moderation.default_timeout_minutes must be 1-{} (got {})",
            MAX_TIMEOUT_MINUTES, moderation.default_timeout_minutes
        ));
    }
    if !(1..=MAX_SCAN_WINDOW_MINUTES).contains(&moderation.scan_window_minutes) {
        errors.push(format!(
            "moderation.scan_window_minutes must be 1-{} (got {})",
            MAX_SCAN_WINDOW_MINUTES, moderation.scan_window_minutes
        ));
    }
    if !(1..=100).contains(&moderation.scan_message_limit) {
        errors.push(format!(
            "moderation.scan_message_limit must be 1-100 (got {})",
            moderation.scan_message_limit
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::*;

    fn make_valid_config() -> Config {
        Config {
            server: ServerConfig::default(),
            discord: DiscordConfig {
                public_key: Some("11".repeat(32)),
                token: Some("valid_token_here".to_string()),
                application_id: Some(123456789),
                audit_channel_id: Some(987654321),
                setup_token: Some("setup".to_string()),
            },
            moderation: ModerationConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&make_valid_config()).is_ok());
    }

    #[test]
    fn test_missing_secrets_pass_validation() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_bad_public_key_fails() {
        let mut config = make_valid_config();
        config.discord.public_key = Some("not-hex".to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("not valid hex"));

        config.discord.public_key = Some("abcd".to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }

    #[test]
    fn test_placeholder_token_fails() {
        let mut config = make_valid_config();
        config.discord.token = Some("YOUR_DISCORD_TOKEN_HERE".to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_errors_are_collected() {
        let mut config = make_valid_config();
        config.discord.audit_channel_id = Some(0);
        config.moderation.default_timeout_minutes = 0;
        config.moderation.scan_window_minutes = 5000;

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("audit_channel_id"));
        assert!(message.contains("default_timeout_minutes"));
        assert!(message.contains("scan_window_minutes"));
    }

    #[test]
    fn test_bad_bind_address_fails() {
        let mut config = make_valid_config();
        config.server.bind_address = "localhost".to_string();
        assert!(validate_config(&config).is_err());
    }
}
