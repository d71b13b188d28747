//! Best-effort audit broadcasts to a moderation log channel.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serenity::all::ChannelId;
use tracing::{debug, warn};

use crate::common::types::{truncate, MAX_CONTENT_LENGTH};
use crate::common::Interaction;
use crate::discord::client::PlatformClient;
use crate::moderation::ModerationCommand;

/// Embed colour used for every audit entry.
pub const AUDIT_COLOR: u32 = 0x6366F1;

const UNKNOWN_MODERATOR: &str = "Unknown moderator";

/// Embed describing one moderation outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub footer: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditEmbed {
    pub fn new(interaction: &Interaction, message: &str) -> Self {
        let title = interaction
            .data
            .as_ref()
            .and_then(|d| ModerationCommand::from_name(&d.name))
            .map(ModerationCommand::audit_title)
            .unwrap_or("Sentinel Moderation Action");

        Self {
            title: title.to_string(),
            description: truncate(message.to_string(), MAX_CONTENT_LENGTH),
            color: AUDIT_COLOR,
            footer: format!("Moderator: {}", moderator_label(interaction)),
            timestamp: Utc::now(),
        }
    }
}

/// Human-readable reference to the acting moderator.
fn moderator_label(interaction: &Interaction) -> String {
    let Some(member) = interaction.member.as_ref() else {
        return UNKNOWN_MODERATOR.to_string();
    };
    match (member.display_name(), member.user.as_ref()) {
        (Some(name), Some(user)) => format!("{} ({})", name, user.id),
        (_, Some(user)) => user.id.clone(),
        (Some(name), None) => name.to_string(),
        (None, None) => UNKNOWN_MODERATOR.to_string(),
    }
}

/// Posts moderation outcomes to the configured audit channel.
pub struct AuditNotifier {
    client: Arc<dyn PlatformClient>,
    channel_id: Option<ChannelId>,
}

impl AuditNotifier {
    pub fn new(client: Arc<dyn PlatformClient>, channel_id: Option<u64>) -> Self {
        Self {
            client,
            channel_id: channel_id.filter(|id| *id != 0).map(ChannelId::new),
        }
    }

    /// Post one embed for `message`. Failures are logged and dropped.
    pub async fn broadcast(&self, interaction: &Interaction, message: &str) {
        let Some(channel_id) = self.channel_id else {
            debug!("No audit channel configured, skipping broadcast");
            return;
        };

        let embed = AuditEmbed::new(interaction, message);
        if let Err(e) = self.client.send_embed(channel_id, &embed).await {
            warn!("Failed to post audit entry to channel {}: {}", channel_id, e);
        }
    }

    /// Run [`broadcast`](Self::broadcast) on a detached task.
    pub fn spawn_broadcast(self: &Arc<Self>, interaction: Interaction, message: String) {
        let notifier = Arc::clone(self);
        // Detached: the interaction response never waits on this.
        drop(tokio::spawn(async move {
            notifier.broadcast(&interaction, &message).await;
        }));
    }
}
