use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::config::SilentDeleteConfig;
use crate::discord::MessageApi;

/// Log target shared by every silent delete operation.
pub const LOG_TARGET: &str = "silent_delete";

/// Fixed pause between deleting the replacement and deleting the original.
const ORIGINAL_DELETE_PAUSE: Duration = Duration::from_millis(100);

/// Mask a message with the replacement text, then delete both.
///
/// The replacement is sent with the original message's id as its nonce so
/// loggers correlate it with the message being removed. Returns `false` if
/// any step fails; earlier steps are not rolled back.
pub async fn silent_delete(
    api: &dyn MessageApi,
    config: &SilentDeleteConfig,
    channel_id: &str,
    message_id: &str,
) -> bool {
    match replace_and_delete(api, config, channel_id, message_id, config.delete_original).await {
        Ok(()) => true,
        Err(e) => {
            error!(target: LOG_TARGET, "Error during silent delete of {}: {:#}", message_id, e);
            false
        }
    }
}

/// Overwrite what a logger recorded for an already deleted message.
///
/// Same as [`silent_delete`] except the original is never deleted.
pub async fn clear_logger_history(
    api: &dyn MessageApi,
    config: &SilentDeleteConfig,
    channel_id: &str,
    deleted_message_id: &str,
) -> bool {
    match replace_and_delete(api, config, channel_id, deleted_message_id, false).await {
        Ok(()) => {
            info!(target: LOG_TARGET, "Cleared message {} from logger history", deleted_message_id);
            true
        }
        Err(e) => {
            error!(
                target: LOG_TARGET,
                "Error during silent delete history of {}: {:#}", deleted_message_id, e
            );
            false
        }
    }
}

async fn replace_and_delete(
    api: &dyn MessageApi,
    config: &SilentDeleteConfig,
    channel_id: &str,
    message_id: &str,
    delete_original: bool,
) -> Result<()> {
    let replacement_id = api
        .send_message(
            channel_id,
            config.replacement_text(),
            message_id,
            config.suppress_notifications,
        )
        .await
        .context("Failed to send replacement message")?;
    debug!(target: LOG_TARGET, "Replacement {} masks {}", replacement_id, message_id);

    tokio::time::sleep(Duration::from_millis(config.delete_delay_ms())).await;

    api.delete_message(channel_id, &replacement_id)
        .await
        .context("Failed to delete replacement message")?;

    if delete_original {
        tokio::time::sleep(ORIGINAL_DELETE_PAUSE).await;
        api.delete_message(channel_id, message_id)
            .await
            .context("Failed to delete original message")?;
    }

    Ok(())
}
