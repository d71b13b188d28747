//! Slash command definitions as published to Discord.
//!
//! Converts the declarative [`CommandMeta`] of each moderation command into
//! serenity builders.

use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};

use crate::moderation::{CommandMeta, OptionKind, OptionMeta};

/// Build the registration payload for one command.
pub fn create_command(meta: &CommandMeta) -> CreateCommand {
    meta.options.iter().fold(
        CreateCommand::new(meta.name)
            .description(meta.description)
            .default_member_permissions(meta.permission),
        |command, option| command.add_option(create_option(option)),
    )
}

fn create_option(meta: &OptionMeta) -> CreateCommandOption {
    let kind = match meta.kind {
        OptionKind::User => CommandOptionType::User,
        OptionKind::Channel => CommandOptionType::Channel,
        OptionKind::String => CommandOptionType::String,
        OptionKind::Integer => CommandOptionType::Integer,
        OptionKind::Boolean => CommandOptionType::Boolean,
    };

    let mut option = CreateCommandOption::new(kind, meta.name, meta.description).required(meta.required);
    if let Some((min, max)) = meta.range {
        option = option.min_int_value(u64::from(min)).max_int_value(u64::from(max));
    }
    if let Some(max) = meta.max_length {
        option = option.max_length(max);
    }
    for choice in meta.choices {
        option = option.add_string_choice(*choice, *choice);
    }
    option
}
