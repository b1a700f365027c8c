use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::SilentDeleteConfig;
use crate::discord::{HistoryMessage, MessageApi, MAX_PAGE_SIZE};
use crate::platform::Notices;
use crate::silent::{silent_delete, LOG_TARGET};

/// Pause between consecutive history page fetches.
const PAGE_FETCH_PAUSE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    /// Own messages collected from history.
    pub found: usize,
    /// Silent deletes that completed every step.
    pub succeeded: usize,
}

impl PurgeReport {
    pub fn summary(&self) -> String {
        format!("Successfully silently deleted {} message(s).", self.succeeded)
    }
}

/// Silently delete the caller's `requested_count` most recent messages in a channel.
///
/// Returns `None` without touching the network when `requested_count < 1`,
/// when none of the caller's messages were found, or when collecting
/// history failed. Otherwise posts the summary notice and returns the report.
pub async fn silent_purge(
    api: &dyn MessageApi,
    notices: &dyn Notices,
    config: &SilentDeleteConfig,
    channel_id: &str,
    requested_count: i64,
) -> Option<PurgeReport> {
    if requested_count < 1 {
        return None;
    }
    let wanted = usize::try_from(requested_count).unwrap_or(usize::MAX);

    let own_messages = match collect_own_messages(api, channel_id, wanted).await {
        Ok(messages) => messages,
        Err(e) => {
            error!(target: LOG_TARGET, "Error during silent purge: {:#}", e);
            return None;
        }
    };

    if own_messages.is_empty() {
        return None;
    }

    info!(
        target: LOG_TARGET,
        "Silently purging {} message(s) in channel {}",
        own_messages.len(),
        channel_id
    );

    let interval = Duration::from_millis(config.purge_interval_ms());
    let mut succeeded = 0;
    for (i, message) in own_messages.iter().enumerate() {
        if silent_delete(api, config, channel_id, &message.id).await {
            succeeded += 1;
        }
        if i + 1 < own_messages.len() {
            tokio::time::sleep(interval).await;
        }
    }

    let report = PurgeReport {
        found: own_messages.len(),
        succeeded,
    };
    notices.notify(channel_id, &report.summary()).await;
    Some(report)
}

/// Walk history backward, newest first, until `wanted` of the caller's
/// messages are collected or history runs out.
pub async fn collect_own_messages(
    api: &dyn MessageApi,
    channel_id: &str,
    wanted: usize,
) -> Result<Vec<HistoryMessage>> {
    let user_id = api
        .current_user_id()
        .await
        .context("Failed to look up current user")?;

    let mut own: Vec<HistoryMessage> = Vec::new();
    let mut before: Option<String> = None;

    loop {
        let page = api
            .fetch_messages(channel_id, MAX_PAGE_SIZE, before.as_deref())
            .await
            .with_context(|| format!("Failed to fetch history of channel {}", channel_id))?;

        let page_len = page.len();
        before = page.last().map(|m| m.id.clone());

        for message in page {
            if own.len() >= wanted {
                break;
            }
            if message.is_authored_by(&user_id) {
                own.push(message);
            }
        }

        if own.len() >= wanted || page_len == 0 || page_len < usize::from(MAX_PAGE_SIZE) {
            break;
        }

        tokio::time::sleep(PAGE_FETCH_PAUSE).await;
    }

    Ok(own)
}
