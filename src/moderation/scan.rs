//! Read-only sweep of a channel's recent activity.

use std::collections::HashSet;

use chrono::Utc;
use fancy_regex::Regex;
use serenity::all::{ChannelId, Permissions};
use tracing::warn;

use crate::common::error::{CommandResult, ModerationError};
use crate::discord::ChannelMessage;
use crate::moderation::{
    ActionContext, CommandMeta, ModerationResult, OptionKind, OptionMeta, MAX_SCAN_WINDOW_MINUTES,
};

pub const META: CommandMeta = CommandMeta {
    name: "sentinel-scan",
    description: "Look for suspicious activity in a channel",
    permission: Permissions::MANAGE_MESSAGES,
    options: &[
        OptionMeta {
            name: "channel",
            description: "Channel to scan (defaults to this one)",
            kind: OptionKind::Channel,
            required: false,
            range: None,
            choices: &[],
            max_length: None,
        },
        OptionMeta {
            name: "window_minutes",
            description: "How many minutes back to look",
            kind: OptionKind::Integer,
            required: false,
            range: Some((1, MAX_SCAN_WINDOW_MINUTES)),
            choices: &[],
            max_length: None,
        },
    ],
};

/// Links and Discord invites.
const LINK_PATTERN: &str = r"(?i)(https?://|www\.|discord(\.gg|(app)?\.com/invite)/)\S+";

/// Counts gathered over the scanned window.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub reviewed: usize,
    pub authors: usize,
    pub with_attachments: usize,
    pub with_links: usize,
    pub member_joins: usize,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.with_attachments == 0 && self.with_links == 0 && self.member_joins == 0
    }
}

/// Summarise messages posted at or after `cutoff` (unix seconds).
pub fn summarize(messages: &[ChannelMessage], cutoff: i64) -> ScanReport {
    let links = match Regex::new(LINK_PATTERN) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Link pattern failed to compile: {}", e);
            None
        }
    };

    let mut report = ScanReport::default();
    let mut authors = HashSet::new();

    for message in messages.iter().filter(|m| m.posted_at >= cutoff) {
        report.reviewed += 1;
        if message.member_join {
            report.member_joins += 1;
            continue;
        }
        authors.insert(message.author_id);
        if message.attachment_count > 0 {
            report.with_attachments += 1;
        }
        let has_link = links
            .as_ref()
            .map(|re| re.is_match(&message.content).unwrap_or(false))
            .unwrap_or(false);
        if has_link {
            report.with_links += 1;
        }
    }

    report.authors = authors.len();
    report
}

pub async fn run(ctx: &ActionContext<'_>) -> CommandResult<ModerationResult> {
    let channel_id = match ctx.options.snowflake("channel")? {
        Some(id) => ChannelId::new(id),
        None => ctx
            .channel_id()
            .ok_or_else(|| ModerationError::validation("Pick a channel to scan."))?,
    };
    let window = ctx.options.bounded(
        "window_minutes",
        1,
        MAX_SCAN_WINDOW_MINUTES,
        ctx.settings.scan_window_minutes,
    )?;

    let messages = ctx
        .client
        .recent_messages(channel_id, ctx.settings.scan_message_limit)
        .await?;
    let cutoff = Utc::now().timestamp() - i64::from(window) * 60;
    let report = summarize(&messages, cutoff);

    let mut message = format!(
        "🔎 Scan of <#{}> over the last {} minutes: {} messages from {} members reviewed.",
        channel_id, window, report.reviewed, report.authors
    );
    if report.is_clean() {
        message.push_str("\nNo suspicious activity found.");
    } else {
        message.push_str(&format!(
            "\n• {} with attachments\n• {} with links\n• {} new member joins",
            report.with_attachments, report.with_links, report.member_joins
        ));
    }

    Ok(ModerationResult::private(message))
}
