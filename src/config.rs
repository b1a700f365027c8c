use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_REPLACEMENT_TEXT: &str = "** **";
pub const DEFAULT_DELETE_DELAY_MS: u64 = 200;
pub const DEFAULT_PURGE_INTERVAL_MS: u64 = 500;
pub const DEFAULT_ACCENT_COLOR: &str = "#ed4245";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub discord: DiscordConfig,
    #[serde(default)]
    pub silent_delete: SilentDeleteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiscordConfig {
    pub token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Skips the `/users/@me` lookup when set.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Options read at call time by every silent delete and purge.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SilentDeleteConfig {
    /// Text to replace the message with before deletion
    #[serde(default = "default_replacement_text")]
    pub replacement_text: String,
    /// Delay before deleting the replacement message (recommended: 100-500)
    #[serde(default = "default_delete_delay_ms")]
    pub delete_delay_ms: u64,
    /// Suppress notifications on the replacement so mentioned users are not pinged
    #[serde(default = "default_true")]
    pub suppress_notifications: bool,
    /// Delete the original message from the server. When disabled the
    /// original reappears after the client resyncs.
    #[serde(default = "default_true")]
    pub delete_original: bool,
    /// Delay between deletions during a purge (recommended: 500-1000)
    #[serde(default = "default_purge_interval_ms")]
    pub purge_interval_ms: u64,
    /// Hex colour for the icon and menu label
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for SilentDeleteConfig {
    fn default() -> Self {
        Self {
            replacement_text: default_replacement_text(),
            delete_delay_ms: default_delete_delay_ms(),
            suppress_notifications: true,
            delete_original: true,
            purge_interval_ms: default_purge_interval_ms(),
            accent_color: default_accent_color(),
        }
    }
}

impl SilentDeleteConfig {
    /// Replacement text, falling back to the placeholder when left empty.
    pub fn replacement_text(&self) -> &str {
        if self.replacement_text.is_empty() {
            DEFAULT_REPLACEMENT_TEXT
        } else {
            &self.replacement_text
        }
    }

    pub fn delete_delay_ms(&self) -> u64 {
        if self.delete_delay_ms == 0 {
            DEFAULT_DELETE_DELAY_MS
        } else {
            self.delete_delay_ms
        }
    }

    pub fn purge_interval_ms(&self) -> u64 {
        if self.purge_interval_ms == 0 {
            DEFAULT_PURGE_INTERVAL_MS
        } else {
            self.purge_interval_ms
        }
    }

    pub fn accent_color(&self) -> &str {
        if self.accent_color.is_empty() {
            DEFAULT_ACCENT_COLOR
        } else {
            &self.accent_color
        }
    }
}

fn default_api_base() -> String {
    "https://discord.com/api/v9".to_string()
}

fn default_replacement_text() -> String {
    DEFAULT_REPLACEMENT_TEXT.to_string()
}

fn default_delete_delay_ms() -> u64 {
    DEFAULT_DELETE_DELAY_MS
}

fn default_purge_interval_ms() -> u64 {
    DEFAULT_PURGE_INTERVAL_MS
}

fn default_accent_color() -> String {
    DEFAULT_ACCENT_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;

        if config.discord.token.trim().is_empty() {
            anyhow::bail!("[discord] token must not be empty");
        }

        Ok(config)
    }
}
