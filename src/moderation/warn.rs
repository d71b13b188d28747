//! `sentinel-warn`: structured warnings with a severity.
//!
//! Nothing is stored; the acknowledgment and the audit entry are the record.

use std::fmt;

use serenity::all::Permissions;

use crate::common::error::{CommandResult, ModerationError};
use crate::moderation::options::{REASON_OPTION, USER_OPTION};
use crate::moderation::{ActionContext, CommandMeta, ModerationResult, OptionKind, OptionMeta};

pub const META: CommandMeta = CommandMeta {
    name: "sentinel-warn",
    description: "Record a warning against a member",
    permission: Permissions::MODERATE_MEMBERS,
    options: &[
        USER_OPTION,
        OptionMeta {
            name: "severity",
            description: "How serious the infraction is",
            kind: OptionKind::String,
            required: false,
            range: None,
            choices: &["low", "medium", "high"],
            max_length: None,
        },
        REASON_OPTION,
    ],
};

/// Warning severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟠",
            Self::High => "🔴",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(name)
    }
}

/// Issue a warning. Nothing changes on Discord besides the acknowledgment.
pub async fn run(ctx: &ActionContext<'_>) -> CommandResult<ModerationResult> {
    let target = ctx.target_user("warn")?;
    let reason = ctx.options.reason();
    let severity = match ctx.options.string("severity") {
        None => Severity::Low,
        Some(raw) => Severity::parse(raw).ok_or_else(|| {
            ModerationError::validation(format!(
                "Unknown severity `{}` (use low, medium or high)",
                raw
            ))
        })?,
    };

    Ok(ModerationResult::audited(format!(
        "📝 Warning issued to <@{}>\n{} Severity: {}\nReason: {}",
        target,
        severity.icon(),
        severity,
        reason
    )))
}
