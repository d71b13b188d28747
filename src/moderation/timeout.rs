//! `sentinel-timeout`: communication timeouts of up to 28 days.

use chrono::Utc;
use serenity::all::Permissions;

use crate::common::error::CommandResult;
use crate::moderation::options::{audit_reason, REASON_OPTION, USER_OPTION};
use crate::moderation::{
    ActionContext, CommandMeta, ModerationResult, OptionKind, OptionMeta, MAX_TIMEOUT_MINUTES,
};

pub const META: CommandMeta = CommandMeta {
    name: "sentinel-timeout",
    description: "Temporarily stop a member from talking",
    permission: Permissions::MODERATE_MEMBERS,
    options: &[
        USER_OPTION,
        OptionMeta {
            name: "duration_minutes",
            description: "Length of the timeout in minutes (max 28 days)",
            kind: OptionKind::Integer,
            required: false,
            range: Some((1, MAX_TIMEOUT_MINUTES)),
            choices: &[],
            max_length: None,
        },
        REASON_OPTION,
    ],
};

/// Apply a communication timeout to the target member.
pub async fn run(ctx: &ActionContext<'_>) -> CommandResult<ModerationResult> {
    let guild_id = ctx.guild_id()?;
    let target = ctx.target_user("timeout")?;
    let reason = ctx.options.reason();
    let minutes = ctx.options.bounded(
        "duration_minutes",
        1,
        MAX_TIMEOUT_MINUTES,
        ctx.settings.default_timeout_minutes,
    )?;

    let until = Utc::now().timestamp() + i64::from(minutes) * 60;
    ctx.client
        .timeout_member(guild_id, target, until, &audit_reason(&reason))
        .await?;

    Ok(ModerationResult::audited(format!(
        "⏳ Timed out <@{}> for {} (until <t:{}:f>).\nReason: {}",
        target,
        format_minutes(minutes),
        until,
        reason
    )))
}

/// Render a minute count as e.g. `1d 2h 5m`.
pub fn format_minutes(minutes: u32) -> String {
    let (days, rest) = (minutes / (24 * 60), minutes % (24 * 60));
    let (hours, mins) = (rest / 60, rest % 60);

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (mins, "m")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{}{}", value, unit))
        .collect();

    if parts.is_empty() {
        "0m".to_string()
    } else {
        parts.join(" ")
    }
}
