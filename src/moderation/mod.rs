//! Moderation commands.
//!
//! Each command lives in its own module with a `META` describing how it is
//! registered and a `run` function carrying it out. [`ModerationCommand`]
//! maps command names onto those handlers.

pub mod ban;
pub mod executor;
pub mod kick;
pub mod options;
pub mod scan;
pub mod timeout;
pub mod warn;

use serenity::all::Permissions;

pub use executor::{ActionContext, ActionExecutor};

/// Discord caps communication timeouts at 28 days.
pub const MAX_TIMEOUT_MINUTES: u32 = 28 * 24 * 60;

/// Discord deletes at most 7 days of history when banning.
pub const MAX_DELETE_MESSAGE_DAYS: u32 = 7;

/// Longest window the scan command will inspect.
pub const MAX_SCAN_WINDOW_MINUTES: u32 = 24 * 60;

/// Value type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    User,
    Channel,
    String,
    Integer,
    Boolean,
}

/// Declarative description of a command option.
#[derive(Debug, Clone, Copy)]
pub struct OptionMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
    /// Inclusive integer bounds.
    pub range: Option<(u32, u32)>,
    pub choices: &'static [&'static str],
    /// Longest accepted string value.
    pub max_length: Option<u16>,
}

/// Declarative description of a slash command.
#[derive(Debug, Clone, Copy)]
pub struct CommandMeta {
    pub name: &'static str,
    pub description: &'static str,
    /// Permission the invoking member must hold.
    pub permission: Permissions,
    pub options: &'static [OptionMeta],
}

/// The moderation commands this service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationCommand {
    Kick,
    Ban,
    Timeout,
    Warn,
    Scan,
}

impl ModerationCommand {
    pub const ALL: [Self; 5] = [Self::Kick, Self::Ban, Self::Timeout, Self::Warn, Self::Scan];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.meta().name == name)
    }

    pub fn meta(self) -> &'static CommandMeta {
        match self {
            Self::Kick => &kick::META,
            Self::Ban => &ban::META,
            Self::Timeout => &timeout::META,
            Self::Warn => &warn::META,
            Self::Scan => &scan::META,
        }
    }

    pub fn audit_title(self) -> &'static str {
        match self {
            Self::Kick => "Sentinel: Member Kicked",
            Self::Ban => "Sentinel: Member Banned",
            Self::Timeout => "Sentinel: Member Timed Out",
            Self::Warn => "Sentinel Warning Issued",
            Self::Scan => "Sentinel: Channel Scanned",
        }
    }
}

/// Every command definition, in registration order.
pub fn definitions() -> Vec<CommandMeta> {
    ModerationCommand::ALL.iter().map(|c| *c.meta()).collect()
}

/// Outcome of a moderation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationResult {
    /// Moderator-facing summary.
    pub message: String,
    /// Whether the outcome should be posted to the audit channel.
    pub notify_channel: bool,
}

impl ModerationResult {
    /// Result that is also broadcast to the audit channel.
    pub fn audited(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            notify_channel: true,
        }
    }

    /// Result shown only to the moderator.
    pub fn private(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            notify_channel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips_every_command() {
        for command in ModerationCommand::ALL {
            assert_eq!(ModerationCommand::from_name(command.meta().name), Some(command));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(ModerationCommand::from_name("kick"), None);
        assert_eq!(ModerationCommand::from_name("sentinel-purge"), None);
    }

    #[test]
    fn test_definitions_are_prefixed_and_unique() {
        let defs = definitions();
        assert_eq!(defs.len(), 5);
        let mut names: Vec<&str> = defs.iter().map(|d| d.name).collect();
        assert!(names.iter().all(|n| n.starts_with("sentinel-")));
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_max_timeout_is_28_days() {
        assert_eq!(MAX_TIMEOUT_MINUTES, 40320);
    }
}
