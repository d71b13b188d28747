//! Discord REST client abstraction.
//!
//! Provides a narrow interface over the Discord HTTP API, hiding serenity
//! implementation details from the moderation commands.

use std::sync::Arc;
use std::time::Duration;

use serenity::all::{
    ApplicationId, ChannelId, Command, CreateEmbed, CreateEmbedFooter, CreateMessage,
    EditMember, GetMessages, GuildId, MessageType, Timestamp, UserId,
};
use serenity::async_trait;
use serenity::http::{Http, HttpBuilder};
use tracing::debug;

use crate::common::error::{DiscordError, DiscordResult};
use crate::discord::audit::AuditEmbed;
use crate::discord::commands::create_command;
use crate::moderation::CommandMeta;

/// A channel message reduced to what the scan command inspects.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    pub author_id: UserId,
    /// Unix seconds.
    pub posted_at: i64,
    pub content: String,
    pub attachment_count: usize,
    /// System message announcing a member joining the guild.
    pub member_join: bool,
}

/// Authenticated operations against the Discord REST API.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn kick_member(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> DiscordResult<()>;

    async fn ban_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        delete_message_days: u8,
        reason: &str,
    ) -> DiscordResult<()>;

    /// Disable communication until `until` (unix seconds).
    async fn timeout_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        until: i64,
        reason: &str,
    ) -> DiscordResult<()>;

    async fn send_direct_message(&self, user_id: UserId, content: &str) -> DiscordResult<()>;

    async fn send_embed(&self, channel_id: ChannelId, embed: &AuditEmbed) -> DiscordResult<()>;

    /// Most recent messages of a channel, newest first.
    async fn recent_messages(&self, channel_id: ChannelId, limit: u8) -> DiscordResult<Vec<ChannelMessage>>;

    /// Overwrite the global application commands. Returns how many were accepted.
    async fn register_commands(&self, commands: &[CommandMeta]) -> DiscordResult<usize>;
}

/// [`PlatformClient`] backed by serenity's HTTP client.
pub struct SerenityClient {
    http: Arc<Http>,
}

impl SerenityClient {
    /// Build the client with our own timeout settings.
    pub fn new(token: &str, application_id: Option<u64>) -> DiscordResult<Self> {
        let reqwest_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DiscordError::RequestFailed {
                message: e.to_string(),
            })?;

        let mut builder = HttpBuilder::new(token).client(reqwest_client);
        if let Some(id) = application_id.filter(|id| *id != 0) {
            builder = builder.application_id(ApplicationId::new(id));
        }

        Ok(Self {
            http: Arc::new(builder.build()),
        })
    }
}

#[async_trait]
impl PlatformClient for SerenityClient {
    async fn kick_member(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> DiscordResult<()> {
        let http: &Http = &self.http;
        guild_id.kick_with_reason(http, user_id, reason).await?;
        Ok(())
    }

    async fn ban_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        delete_message_days: u8,
        reason: &str,
    ) -> DiscordResult<()> {
        let http: &Http = &self.http;
        guild_id
            .ban_with_reason(http, user_id, delete_message_days, reason)
            .await?;
        Ok(())
    }

    async fn timeout_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        until: i64,
        reason: &str,
    ) -> DiscordResult<()> {
        let http: &Http = &self.http;
        let until = Timestamp::from_unix_timestamp(until).map_err(|e| DiscordError::RequestFailed {
            message: format!("invalid timeout expiry: {}", e),
        })?;
        let builder = EditMember::new()
            .disable_communication_until_datetime(until)
            .audit_log_reason(reason);
        guild_id.edit_member(http, user_id, builder).await?;
        Ok(())
    }

    async fn send_direct_message(&self, user_id: UserId, content: &str) -> DiscordResult<()> {
        let http: &Http = &self.http;
        let channel = user_id.create_dm_channel(http).await?;
        channel
            .id
            .send_message(http, CreateMessage::new().content(content))
            .await?;
        Ok(())
    }

    async fn send_embed(&self, channel_id: ChannelId, embed: &AuditEmbed) -> DiscordResult<()> {
        let http: &Http = &self.http;
        let mut builder = CreateEmbed::new()
            .title(embed.title.as_str())
            .description(embed.description.as_str())
            .colour(embed.color)
            .footer(CreateEmbedFooter::new(embed.footer.as_str()));
        if let Ok(timestamp) = Timestamp::from_unix_timestamp(embed.timestamp.timestamp()) {
            builder = builder.timestamp(timestamp);
        }

        channel_id
            .send_message(http, CreateMessage::new().embed(builder))
            .await?;
        Ok(())
    }

    async fn recent_messages(&self, channel_id: ChannelId, limit: u8) -> DiscordResult<Vec<ChannelMessage>> {
        let http: &Http = &self.http;
        let messages = channel_id
            .messages(http, GetMessages::new().limit(limit))
            .await?;
        debug!("Fetched {} messages from channel {}", messages.len(), channel_id);

        Ok(messages
            .into_iter()
            .map(|m| ChannelMessage {
                author_id: m.author.id,
                posted_at: m.timestamp.unix_timestamp(),
                attachment_count: m.attachments.len(),
                member_join: m.kind == MessageType::MemberJoin,
                content: m.content,
            })
            .collect())
    }

    async fn register_commands(&self, commands: &[CommandMeta]) -> DiscordResult<usize> {
        let http: &Http = &self.http;
        let builders = commands.iter().map(create_command).collect();
        let registered = Command::set_global_commands(http, builders).await?;
        Ok(registered.len())
    }
}
