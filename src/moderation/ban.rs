//! `sentinel-ban`.

use serenity::all::Permissions;

use crate::common::error::CommandResult;
use crate::moderation::options::{audit_reason, REASON_OPTION, USER_OPTION};
use crate::moderation::{
    ActionContext, CommandMeta, ModerationResult, OptionKind, OptionMeta, MAX_DELETE_MESSAGE_DAYS,
};

pub const META: CommandMeta = CommandMeta {
    name: "sentinel-ban",
    description: "Ban a member and optionally purge their recent messages",
    permission: Permissions::BAN_MEMBERS,
    options: &[
        USER_OPTION,
        REASON_OPTION,
        OptionMeta {
            name: "delete_days",
            description: "Days of message history to delete (0-7)",
            kind: OptionKind::Integer,
            required: false,
            range: Some((0, MAX_DELETE_MESSAGE_DAYS)),
            choices: &[],
            max_length: None,
        },
    ],
};

pub async fn run(ctx: &ActionContext<'_>) -> CommandResult<ModerationResult> {
    let guild_id = ctx.guild_id()?;
    let target = ctx.target_user("ban")?;
    let reason = ctx.options.reason();
    let delete_days = ctx
        .options
        .bounded("delete_days", 0, MAX_DELETE_MESSAGE_DAYS, 0)?;

    ctx.client
        .ban_member(guild_id, target, delete_days as u8, &audit_reason(&reason))
        .await?;

    let mut message = format!("🔨 Banned <@{}>.\nReason: {}", target, reason);
    if delete_days > 0 {
        message.push_str(&format!(
            "\nDeleted {} day{} of message history.",
            delete_days,
            if delete_days == 1 { "" } else { "s" }
        ));
    }
    Ok(ModerationResult::audited(message))
}
