use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use silentdelete::config::Config;
use silentdelete::discord::DiscordClient;
use silentdelete::platform::commands::{execute_silentpurge, CommandArg, COUNT_OPTION};
use silentdelete::platform::ConsoleNotices;
use silentdelete::silent;

#[derive(Debug, Parser)]
#[command(
    name = "silentdelete",
    about = "Delete your own messages without leaving their content to message loggers",
    version
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "PATH", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Replace a message with the placeholder, then delete it.
    Delete { channel_id: String, message_id: String },

    /// Overwrite what loggers hold for a message that is already deleted.
    History { channel_id: String, message_id: String },

    /// Silently delete your most recent messages in a channel.
    Purge {
        channel_id: String,
        /// How many of your messages to delete (1-100).
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,silentdelete=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    info!("Loading configuration from: {}", cli.config.display());
    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    info!("Configuration loaded successfully");
    info!("  API: {}", config.discord.api_base);
    info!("  Delete delay: {} ms", config.silent_delete.delete_delay_ms());
    info!("  Delete original: {}", config.silent_delete.delete_original);
    info!("  Purge interval: {} ms", config.silent_delete.purge_interval_ms());

    let settings = config.silent_delete.clone();
    let api = DiscordClient::new(config.discord);

    match cli.command {
        Command::Delete {
            channel_id,
            message_id,
        } => {
            if !silent::silent_delete(&api, &settings, &channel_id, &message_id).await {
                anyhow::bail!("Silent delete of message {} failed", message_id);
            }
            info!("Silently deleted message {}", message_id);
        }
        Command::History {
            channel_id,
            message_id,
        } => {
            if !silent::clear_logger_history(&api, &settings, &channel_id, &message_id).await {
                anyhow::bail!("Clearing logger history of message {} failed", message_id);
            }
        }
        Command::Purge { channel_id, count } => {
            let args = [CommandArg {
                name: COUNT_OPTION.to_string(),
                value: count.into(),
            }];
            match execute_silentpurge(&api, &ConsoleNotices, &settings, &channel_id, &args).await
            {
                Some(report) => info!(
                    "Purge finished: {}/{} message(s) deleted",
                    report.succeeded, report.found
                ),
                None => info!("Nothing was purged"),
            }
        }
    }

    Ok(())
}
