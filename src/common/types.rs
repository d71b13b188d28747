//! Interaction payloads exchanged with Discord.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response type acknowledging a handshake (PONG).
pub const RESPONSE_PONG: u8 = 1;

/// Response type carrying a message in reply to a command.
pub const RESPONSE_CHANNEL_MESSAGE: u8 = 4;

/// Message flag restricting visibility to the invoking user.
pub const EPHEMERAL_FLAG: u64 = 1 << 6;

/// Longest message content Discord accepts.
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// Kind of inbound interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum InteractionType {
    /// Liveness/ownership check sent while configuring the endpoint.
    Handshake,
    /// A slash command invocation.
    ApplicationCommand,
    /// Components, autocomplete, modals and anything newer.
    Other(u8),
}

impl From<u8> for InteractionType {
    fn from(id: u8) -> Self {
        match id {
            1 => Self::Handshake,
            2 => Self::ApplicationCommand,
            other => Self::Other(other),
        }
    }
}

/// An inbound interaction. Only the fields the service reads are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default)]
    pub data: Option<CommandData>,
    #[serde(default)]
    pub member: Option<InteractionMember>,
    /// Invoking user outside of guilds.
    #[serde(default)]
    pub user: Option<InteractionUser>,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
}

impl Interaction {
    /// The invoking user, whether the command ran in a guild or a DM.
    pub fn invoker(&self) -> Option<&InteractionUser> {
        self.member
            .as_ref()
            .and_then(|m| m.user.as_ref())
            .or(self.user.as_ref())
    }
}

/// Slash command payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

/// A single name/value option passed to a command.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// Guild member who invoked the interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionMember {
    #[serde(default)]
    pub user: Option<InteractionUser>,
    #[serde(default)]
    pub nick: Option<String>,
    /// Computed permission bitfield, serialised as a decimal string.
    #[serde(default)]
    pub permissions: Option<String>,
}

impl InteractionMember {
    /// Display handle: nickname, then global name, then username.
    pub fn display_name(&self) -> Option<&str> {
        self.nick
            .as_deref()
            .or_else(|| self.user.as_ref().map(InteractionUser::display_name))
    }
}

/// A Discord user as it appears inside an interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionUser {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

impl InteractionUser {
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

/// Outbound interaction response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

/// Message body of a type-4 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseData {
    pub content: String,
    pub flags: u64,
}

impl InteractionResponse {
    /// Handshake acknowledgment.
    pub fn pong() -> Self {
        Self {
            kind: RESPONSE_PONG,
            data: None,
        }
    }

    /// Message visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: RESPONSE_CHANNEL_MESSAGE,
            data: Some(ResponseData {
                content: truncate(content.into(), MAX_CONTENT_LENGTH),
                flags: EPHEMERAL_FLAG,
            }),
        }
    }

    #[cfg(test)]
    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.content.as_str())
    }
}

/// Truncate to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(mut text: String, max: usize) -> String {
    if text.chars().count() <= max {
        return text;
    }
    let cut = text
        .char_indices()
        .nth(max.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.truncate(cut);
    text.push('…');
    text
}
