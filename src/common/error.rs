//! Error types for the application.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

/// Discord REST API errors.
#[derive(Debug, Error)]
pub enum DiscordError {
    #[error("Discord request failed: {message}")]
    RequestFailed { message: String },

    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),
}

/// Errors raised while executing a moderation command.
///
/// These never leave the process as an HTTP error; the dispatcher renders
/// them into an ephemeral message instead.
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("You need the {permission} permission to use this command")]
    PermissionDenied { permission: String },

    #[error("{0}")]
    Upstream(#[from] DiscordError),
}

impl ModerationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Errors that cross the transport boundary as non-200 statuses.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Server misconfiguration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Invalid request signature: {reason}")]
    Authentication { reason: &'static str },
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        match self {
            Self::Configuration(e) => {
                error!("Rejecting interaction, configuration incomplete: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfiguration").into_response()
            }
            Self::Authentication { reason } => {
                warn!(reason, "Rejecting interaction with bad signature");
                (StatusCode::UNAUTHORIZED, "Invalid request signature").into_response()
            }
        }
    }
}

/// Errors from the command registration endpoint.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Failed to register commands: {0}")]
    Upstream(#[from] DiscordError),
}

impl IntoResponse for SetupError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            Self::Upstream(e) => {
                error!("Command registration failed: {}", e);
                (StatusCode::BAD_GATEWAY, "Command registration failed").into_response()
            }
        }
    }
}

/// Result type alias for Discord operations.
pub type DiscordResult<T> = std::result::Result<T, DiscordError>;

/// Result type alias for moderation commands.
pub type CommandResult<T> = std::result::Result<T, ModerationError>;
