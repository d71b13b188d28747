//! `sentinel-kick`: remove a member, optionally DMing them the reason first.

use serenity::all::Permissions;
use tracing::warn;

use crate::common::error::CommandResult;
use crate::moderation::options::{audit_reason, REASON_OPTION, USER_OPTION};
use crate::moderation::{ActionContext, CommandMeta, ModerationResult, OptionKind, OptionMeta};

pub const META: CommandMeta = CommandMeta {
    name: "sentinel-kick",
    description: "Remove a member from the server",
    permission: Permissions::KICK_MEMBERS,
    options: &[
        USER_OPTION,
        REASON_OPTION,
        OptionMeta {
            name: "notify_user",
            description: "Send the member a DM with the reason",
            kind: OptionKind::Boolean,
            required: false,
            range: None,
            choices: &[],
            max_length: None,
        },
    ],
};

/// Kick the target member, optionally telling them why first.
pub async fn run(ctx: &ActionContext<'_>) -> CommandResult<ModerationResult> {
    let guild_id = ctx.guild_id()?;
    let target = ctx.target_user("kick")?;
    let reason = ctx.options.reason();
    let notify = ctx
        .options
        .boolean("notify_user")?
        .unwrap_or(ctx.settings.notify_on_kick);

    // The DM has to go out while we still share a guild with the member.
    let mut dm_failed = false;
    if notify {
        let dm = format!("You have been kicked from the server.\nReason: {}", reason);
        if let Err(e) = ctx.client.send_direct_message(target, &dm).await {
            warn!("Could not DM kicked member {}: {}", target, e);
            dm_failed = true;
        }
    }

    ctx.client
        .kick_member(guild_id, target, &audit_reason(&reason))
        .await?;

    let mut message = format!("👢 Kicked <@{}>.\nReason: {}", target, reason);
    if dm_failed {
        message.push_str("\n(Could not send them a direct message.)");
    }
    Ok(ModerationResult::audited(message))
}
