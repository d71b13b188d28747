//! Typed access to command options.

use serde_json::Value;

use crate::common::error::{CommandResult, ModerationError};
use crate::common::types::{truncate, CommandOption};
use crate::moderation::{OptionKind, OptionMeta};

/// Longest audit log reason Discord accepts.
pub const MAX_AUDIT_REASON_LENGTH: usize = 512;

/// Longest reason a moderator may type.
pub const MAX_REASON_LENGTH: u16 = 512;

pub const DEFAULT_REASON: &str = "No reason provided";

pub const USER_OPTION: OptionMeta = OptionMeta {
    name: "user",
    description: "Member to act on",
    kind: OptionKind::User,
    required: true,
    range: None,
    choices: &[],
    max_length: None,
};

pub const REASON_OPTION: OptionMeta = OptionMeta {
    name: "reason",
    description: "Why this action is being taken",
    kind: OptionKind::String,
    required: false,
    range: None,
    choices: &[],
    max_length: Some(MAX_REASON_LENGTH),
};

/// Read-only view over the options of one invocation.
#[derive(Debug, Clone, Copy)]
pub struct CommandOptions<'a> {
    options: &'a [CommandOption],
}

impl<'a> CommandOptions<'a> {
    pub fn new(options: &'a [CommandOption]) -> Self {
        Self { options }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.value)
            .filter(|v| !v.is_null())
    }

    /// Non-empty string value.
    pub fn string(&self, name: &str) -> Option<&'a str> {
        self.get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Snowflake id, sent by Discord as a string.
    pub fn snowflake(&self, name: &str) -> CommandResult<Option<u64>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let id = match value {
            Value::String(s) => parse_snowflake(s),
            Value::Number(n) => n.as_u64().filter(|id| *id != 0),
            _ => None,
        };
        id.map(Some)
            .ok_or_else(|| ModerationError::validation(format!("Option `{}` is not a valid id", name)))
    }

    pub fn integer(&self, name: &str) -> CommandResult<Option<i64>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let number = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        number
            .map(Some)
            .ok_or_else(|| ModerationError::validation(format!("Option `{}` must be a whole number", name)))
    }

    pub fn boolean(&self, name: &str) -> CommandResult<Option<bool>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        match value {
            Value::Bool(b) => Ok(Some(*b)),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" => Ok(Some(true)),
                "false" | "no" => Ok(Some(false)),
                _ => Err(ModerationError::validation(format!("Option `{}` must be true or false", name))),
            },
            _ => Err(ModerationError::validation(format!("Option `{}` must be true or false", name))),
        }
    }

    /// Integer within `[min, max]`, or `default` when absent.
    ///
    /// Out-of-range values are rejected rather than clamped.
    pub fn bounded(&self, name: &str, min: u32, max: u32, default: u32) -> CommandResult<u32> {
        match self.integer(name)? {
            None => Ok(default),
            Some(value) if value >= i64::from(min) && value <= i64::from(max) => Ok(value as u32),
            Some(value) => Err(ModerationError::validation(format!(
                "Option `{}` must be between {} and {} (got {})",
                name, min, max, value
            ))),
        }
    }

    /// Reason text safe to echo back into Discord, cut to [`MAX_REASON_LENGTH`].
    pub fn reason(&self) -> String {
        self.string(REASON_OPTION.name)
            .map(|r| truncate(r.to_string(), usize::from(MAX_REASON_LENGTH)))
            .map(|r| defuse_mentions(&r))
            .unwrap_or_else(|| DEFAULT_REASON.to_string())
    }
}

pub fn parse_snowflake(value: &str) -> Option<u64> {
    value.trim().parse().ok().filter(|id| *id != 0)
}

/// Break `@everyone`, `@here` and role pings by inserting a zero-width space.
pub fn defuse_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Reason as recorded in the guild audit log.
pub fn audit_reason(reason: &str) -> String {
    truncate(reason.to_string(), MAX_AUDIT_REASON_LENGTH)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn options(value: Value) -> Vec<CommandOption> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_string_trims_and_skips_empty() {
        let opts = options(json!([{"name": "reason", "value": "  spam "}, {"name": "note", "value": ""}]));
        let view = CommandOptions::new(&opts);
        assert_eq!(view.string("reason"), Some("spam"));
        assert_eq!(view.string("note"), None);
        assert_eq!(view.string("missing"), None);
    }

    #[test]
    fn test_snowflake_accepts_string_and_number() {
        let opts = options(json!([{"name": "a", "value": "123"}, {"name": "b", "value": 456}]));
        let view = CommandOptions::new(&opts);
        assert_eq!(view.snowflake("a").unwrap(), Some(123));
        assert_eq!(view.snowflake("b").unwrap(), Some(456));
        assert_eq!(view.snowflake("c").unwrap(), None);
    }

    #[test]
    fn test_snowflake_rejects_garbage() {
        let opts = options(json!([{"name": "a", "value": "abc"}, {"name": "b", "value": "0"}]));
        let view = CommandOptions::new(&opts);
        assert!(view.snowflake("a").is_err());
        assert!(view.snowflake("b").is_err());
    }

    #[test]
    fn test_bounded() {
        let opts = options(json!([
            {"name": "days", "value": 3},
            {"name": "too_big", "value": 8},
            {"name": "negative", "value": -1},
            {"name": "text", "value": "5"}
        ]));
        let view = CommandOptions::new(&opts);
        assert_eq!(view.bounded("days", 0, 7, 0).unwrap(), 3);
        assert_eq!(view.bounded("text", 0, 7, 0).unwrap(), 5);
        assert_eq!(view.bounded("absent", 0, 7, 2).unwrap(), 2);

        let err = view.bounded("too_big", 0, 7, 0).unwrap_err();
        assert!(err.to_string().contains("between 0 and 7"));
        assert!(view.bounded("negative", 0, 7, 0).is_err());
    }

    #[test]
    fn test_boolean() {
        let opts = options(json!([{"name": "a", "value": false}, {"name": "b", "value": "maybe"}]));
        let view = CommandOptions::new(&opts);
        assert_eq!(view.boolean("a").unwrap(), Some(false));
        assert!(view.boolean("b").is_err());
        assert_eq!(view.boolean("c").unwrap(), None);
    }

    #[test]
    fn test_reason_defaults_and_defuses() {
        let empty: Vec<CommandOption> = Vec::new();
        assert_eq!(CommandOptions::new(&empty).reason(), DEFAULT_REASON);

        let opts = options(json!([{"name": "reason", "value": "ping @everyone"}]));
        assert_eq!(CommandOptions::new(&opts).reason(), "ping @\u{200B}everyone");
    }

    #[test]
    fn test_long_reason_cut_to_limit() {
        let opts = options(json!([{"name": "reason", "value": "r".repeat(3000)}]));
        let reason = CommandOptions::new(&opts).reason();
        assert_eq!(reason.chars().count(), usize::from(MAX_REASON_LENGTH));
        assert!(reason.ends_with('…'));
    }

    #[test]
    fn test_audit_reason_truncated() {
        let long = "r".repeat(600);
        assert_eq!(audit_reason(&long).chars().count(), MAX_AUDIT_REASON_LENGTH);
    }
}
