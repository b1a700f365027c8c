use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::SilentDeleteConfig;
use crate::discord::MessageApi;
use crate::purge::{silent_purge, PurgeReport};

use super::Notices;

pub const SILENTPURGE_COMMAND: &str = "silentpurge";
pub const COUNT_OPTION: &str = "count";
pub const MIN_PURGE_COUNT: i64 = 1;
pub const MAX_PURGE_COUNT: i64 = 100;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CommandOptionType {
    Integer,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub option_type: CommandOptionType,
    pub required: bool,
    pub min_value: i64,
    pub max_value: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
}

/// An argument as the host passes it to a command handler.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandArg {
    pub name: String,
    pub value: Value,
}

pub fn silentpurge_command() -> CommandDefinition {
    CommandDefinition {
        name: SILENTPURGE_COMMAND.to_string(),
        description: "Silently delete your recent messages in this channel".to_string(),
        options: vec![CommandOption {
            name: COUNT_OPTION.to_string(),
            description: "Number of your messages to silently delete (1-100)".to_string(),
            option_type: CommandOptionType::Integer,
            required: true,
            min_value: MIN_PURGE_COUNT,
            max_value: MAX_PURGE_COUNT,
        }],
    }
}

/// The `count` option, if present and within `1..=100`.
pub fn parse_count(args: &[CommandArg]) -> Option<i64> {
    let count = args
        .iter()
        .find(|a| a.name == COUNT_OPTION)
        .and_then(|a| a.value.as_i64())?;
    (MIN_PURGE_COUNT..=MAX_PURGE_COUNT)
        .contains(&count)
        .then_some(count)
}

/// Handler for `/silentpurge`. Invalid input is ignored without feedback.
pub async fn execute_silentpurge(
    api: &dyn MessageApi,
    notices: &dyn Notices,
    config: &SilentDeleteConfig,
    channel_id: &str,
    args: &[CommandArg],
) -> Option<PurgeReport> {
    let Some(count) = parse_count(args) else {
        debug!("Ignoring /{} with invalid arguments: {:?}", SILENTPURGE_COMMAND, args);
        return None;
    };

    silent_purge(api, notices, config, channel_id, count).await
}
