//! In-memory [`PlatformClient`] used by tests.

use std::collections::HashSet;
use std::sync::Mutex;

use serenity::all::{ChannelId, GuildId, UserId};
use serenity::async_trait;
use tokio::sync::Notify;

use crate::common::error::{DiscordError, DiscordResult};
use crate::discord::audit::AuditEmbed;
use crate::discord::client::{ChannelMessage, PlatformClient};
use crate::moderation::CommandMeta;

/// A recorded call: operation name plus a short description of its arguments.
pub type Call = (&'static str, String);

/// Records every call and fails the operations it was told to fail.
#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    embeds: Mutex<Vec<(ChannelId, AuditEmbed)>>,
    failing: HashSet<&'static str>,
    messages: Vec<ChannelMessage>,
    embed_posted: Notify,
    stall_embeds: bool,
}

impl RecordingClient {
    pub fn failing(operations: &[&'static str]) -> Self {
        Self {
            failing: operations.iter().copied().collect(),
            ..Default::default()
        }
    }

    /// `send_embed` records the call and then never completes.
    pub fn stalling_embeds() -> Self {
        Self {
            stall_embeds: true,
            ..Default::default()
        }
    }

    pub fn with_messages(messages: Vec<ChannelMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|(op, _)| *op == operation).count()
    }

    pub fn embeds(&self) -> Vec<(ChannelId, AuditEmbed)> {
        self.embeds.lock().unwrap().clone()
    }

    /// Wait until an embed has been attempted, or panic after a second.
    pub async fn wait_for_embed(&self) {
        if self.call_count("send_embed") > 0 {
            return;
        }
        tokio::time::timeout(std::time::Duration::from_secs(1), self.embed_posted.notified())
            .await
            .expect("no audit embed was attempted");
    }

    fn record(&self, operation: &'static str, args: String) -> DiscordResult<()> {
        self.calls.lock().unwrap().push((operation, args));
        if self.failing.contains(operation) {
            return Err(DiscordError::RequestFailed {
                message: format!("{} rejected (403 Missing Permissions)", operation),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PlatformClient for RecordingClient {
    async fn kick_member(&self, guild_id: GuildId, user_id: UserId, reason: &str) -> DiscordResult<()> {
        self.record("kick_member", format!("{} {} {}", guild_id, user_id, reason))
    }

    async fn ban_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        delete_message_days: u8,
        reason: &str,
    ) -> DiscordResult<()> {
        self.record(
            "ban_member",
            format!("{} {} {} {}", guild_id, user_id, delete_message_days, reason),
        )
    }

    async fn timeout_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        until: i64,
        reason: &str,
    ) -> DiscordResult<()> {
        self.record("timeout_member", format!("{} {} {} {}", guild_id, user_id, until, reason))
    }

    async fn send_direct_message(&self, user_id: UserId, content: &str) -> DiscordResult<()> {
        self.record("send_direct_message", format!("{} {}", user_id, content))
    }

    async fn send_embed(&self, channel_id: ChannelId, embed: &AuditEmbed) -> DiscordResult<()> {
        let result = self.record("send_embed", format!("{} {}", channel_id, embed.description));
        if self.stall_embeds {
            self.embed_posted.notify_one();
            std::future::pending::<()>().await;
        }
        if result.is_ok() {
            self.embeds.lock().unwrap().push((channel_id, embed.clone()));
        }
        self.embed_posted.notify_one();
        result
    }

    async fn recent_messages(&self, channel_id: ChannelId, limit: u8) -> DiscordResult<Vec<ChannelMessage>> {
        self.record("recent_messages", format!("{} {}", channel_id, limit))?;
        Ok(self.messages.iter().take(limit as usize).cloned().collect())
    }

    async fn register_commands(&self, commands: &[CommandMeta]) -> DiscordResult<usize> {
        let names: Vec<&str> = commands.iter().map(|c| c.name).collect();
        self.record("register_commands", names.join(","))?;
        Ok(commands.len())
    }
}
