//! Maps a command name onto its handler and runs it.

use std::sync::Arc;

use serenity::all::{ChannelId, GuildId, Permissions, UserId};
use tracing::{info, instrument};

use crate::common::error::{CommandResult, ModerationError};
use crate::common::Interaction;
use crate::config::ModerationConfig;
use crate::discord::PlatformClient;
use crate::moderation::options::{parse_snowflake, CommandOptions, USER_OPTION};
use crate::moderation::{ban, kick, scan, timeout, warn, ModerationCommand, ModerationResult};

/// Everything a command handler needs for one invocation.
pub struct ActionContext<'a> {
    pub client: &'a dyn PlatformClient,
    pub settings: &'a ModerationConfig,
    pub interaction: &'a Interaction,
    pub options: CommandOptions<'a>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        client: &'a dyn PlatformClient,
        settings: &'a ModerationConfig,
        interaction: &'a Interaction,
    ) -> Self {
        let options = interaction
            .data
            .as_ref()
            .map(|d| d.options.as_slice())
            .unwrap_or_default();
        Self {
            client,
            settings,
            interaction,
            options: CommandOptions::new(options),
        }
    }

    /// Guild the command was invoked in.
    pub fn guild_id(&self) -> CommandResult<GuildId> {
        self.interaction
            .guild_id
            .as_deref()
            .and_then(parse_snowflake)
            .map(GuildId::new)
            .ok_or_else(|| ModerationError::validation("This command only works in servers."))
    }

    /// Channel the command was invoked in.
    pub fn channel_id(&self) -> Option<ChannelId> {
        self.interaction
            .channel_id
            .as_deref()
            .and_then(parse_snowflake)
            .map(ChannelId::new)
    }

    pub fn moderator_id(&self) -> Option<UserId> {
        self.interaction
            .invoker()
            .and_then(|u| parse_snowflake(&u.id))
            .map(UserId::new)
    }

    /// The required `user` option, refusing to target the moderator.
    pub fn target_user(&self, action: &str) -> CommandResult<UserId> {
        let target = self
            .options
            .snowflake(USER_OPTION.name)?
            .map(UserId::new)
            .ok_or_else(|| ModerationError::validation("Option `user` is required."))?;

        if self.moderator_id() == Some(target) {
            return Err(ModerationError::validation(format!("You can't {} yourself.", action)));
        }
        Ok(target)
    }
}

/// Runs moderation commands against Discord.
pub struct ActionExecutor {
    client: Arc<dyn PlatformClient>,
    settings: ModerationConfig,
}

impl ActionExecutor {
    pub fn new(client: Arc<dyn PlatformClient>, settings: ModerationConfig) -> Self {
        Self { client, settings }
    }

    /// Execute `command_name` on behalf of the interaction's invoker.
    #[instrument(skip(self, interaction), fields(guild = interaction.guild_id.as_deref()))]
    pub async fn perform(
        &self,
        command_name: &str,
        interaction: &Interaction,
    ) -> CommandResult<ModerationResult> {
        let command = ModerationCommand::from_name(command_name).ok_or_else(|| {
            ModerationError::UnknownCommand {
                name: command_name.to_string(),
            }
        })?;
        check_permission(command, interaction)?;

        let ctx = ActionContext::new(self.client.as_ref(), &self.settings, interaction);
        info!(
            moderator = ctx.moderator_id().map(|id| id.get()),
            "Executing {}", command_name
        );

        match command {
            ModerationCommand::Kick => kick::run(&ctx).await,
            ModerationCommand::Ban => ban::run(&ctx).await,
            ModerationCommand::Timeout => timeout::run(&ctx).await,
            ModerationCommand::Warn => warn::run(&ctx).await,
            ModerationCommand::Scan => scan::run(&ctx).await,
        }
    }
}

/// Check the invoking member's permission bitfield, when Discord sent one.
fn check_permission(command: ModerationCommand, interaction: &Interaction) -> CommandResult<()> {
    let Some(raw) = interaction
        .member
        .as_ref()
        .and_then(|m| m.permissions.as_deref())
    else {
        return Ok(());
    };

    let bits: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ModerationError::validation("Could not read your permissions."))?;
    let granted = Permissions::from_bits_truncate(bits);
    let required = command.meta().permission;

    if granted.administrator() || granted.contains(required) {
        Ok(())
    } else {
        Err(ModerationError::PermissionDenied {
            permission: required.get_permission_names().join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::mock::RecordingClient;

    fn interaction(body: &str) -> Interaction {
        serde_json::from_str(body).unwrap()
    }

    fn executor(client: Arc<RecordingClient>) -> ActionExecutor {
        ActionExecutor::new(client, ModerationConfig::default())
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let client = Arc::new(RecordingClient::default());
        let err = executor(client.clone())
            .perform("sentinel-nuke", &interaction(r#"{"type":2,"data":{"name":"sentinel-nuke"}}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ModerationError::UnknownCommand { .. }));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_permission_denied_before_any_call() {
        let client = Arc::new(RecordingClient::default());
        // SEND_MESSAGES only
        let i = interaction(
            r#"{"type":2,"guild_id":"1","data":{"name":"sentinel-ban","options":[{"name":"user","value":"2"}]},
                "member":{"user":{"id":"3","username":"mod"},"permissions":"2048"}}"#,
        );
        let err = executor(client.clone()).perform("sentinel-ban", &i).await.unwrap_err();
        assert!(matches!(err, ModerationError::PermissionDenied { .. }));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_administrator_passes_any_check() {
        let client = Arc::new(RecordingClient::default());
        let i = interaction(
            r#"{"type":2,"guild_id":"1","data":{"name":"sentinel-ban","options":[{"name":"user","value":"2"}]},
                "member":{"user":{"id":"3","username":"mod"},"permissions":"8"}}"#,
        );
        let result = executor(client.clone()).perform("sentinel-ban", &i).await.unwrap();
        assert!(result.notify_channel);
        assert_eq!(client.call_count("ban_member"), 1);
    }

    #[tokio::test]
    async fn test_self_target_rejected() {
        let client = Arc::new(RecordingClient::default());
        let i = interaction(
            r#"{"type":2,"guild_id":"1","data":{"name":"sentinel-kick","options":[{"name":"user","value":"3"}]},
                "member":{"user":{"id":"3","username":"mod"},"permissions":"8"}}"#,
        );
        let err = executor(client.clone()).perform("sentinel-kick", &i).await.unwrap_err();
        assert!(err.to_string().contains("yourself"));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_guild_command_outside_guild() {
        let client = Arc::new(RecordingClient::default());
        let i = interaction(
            r#"{"type":2,"data":{"name":"sentinel-kick","options":[{"name":"user","value":"2"}]}}"#,
        );
        let err = executor(client).perform("sentinel-kick", &i).await.unwrap_err();
        assert!(err.to_string().contains("only works in servers"));
    }
}
