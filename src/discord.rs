use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DiscordConfig;

/// `SUPPRESS_NOTIFICATIONS` message flag (1 << 12).
pub const SUPPRESS_NOTIFICATIONS_FLAG: u64 = 1 << 12;

/// Largest page the history endpoint will return.
pub const MAX_PAGE_SIZE: u8 = 100;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MessageAuthor {
    pub id: String,
}

/// A message as returned by the channel history endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HistoryMessage {
    pub id: String,
    #[serde(default)]
    pub author: Option<MessageAuthor>,
}

impl HistoryMessage {
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author.as_ref().is_some_and(|a| a.id == user_id)
    }
}

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    content: &'a str,
    flags: u64,
    mobile_network_type: &'a str,
    nonce: &'a str,
    tts: bool,
}

impl<'a> SendMessageBody<'a> {
    fn new(content: &'a str, nonce: &'a str, suppress_notifications: bool) -> Self {
        Self {
            content,
            flags: if suppress_notifications {
                SUPPRESS_NOTIFICATIONS_FLAG
            } else {
                0
            },
            mobile_network_type: "unknown",
            nonce,
            tts: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CurrentUser {
    id: String,
}

/// The message endpoints a silent delete needs from the chat service.
#[async_trait]
pub trait MessageApi: Send + Sync {
    /// Post `content` to the channel and return the server-assigned id.
    async fn send_message(
        &self,
        channel_id: &str,
        content: &str,
        nonce: &str,
        suppress_notifications: bool,
    ) -> Result<String>;

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<()>;

    /// Newest-first page of history, strictly older than `before` when given.
    async fn fetch_messages(
        &self,
        channel_id: &str,
        limit: u8,
        before: Option<&str>,
    ) -> Result<Vec<HistoryMessage>>;

    async fn current_user_id(&self) -> Result<String>;
}

pub struct DiscordClient {
    client: reqwest::Client,
    config: DiscordConfig,
}

impl DiscordClient {
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn messages_url(&self, channel_id: &str) -> String {
        format!(
            "{}/channels/{}/messages",
            self.config.api_base.trim_end_matches('/'),
            channel_id
        )
    }

    fn message_url(&self, channel_id: &str, message_id: &str) -> String {
        format!("{}/{}", self.messages_url(channel_id), message_id)
    }

    async fn ensure_success(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Discord API error on {} ({}): {}", what, status, error_body);
        }
        Ok(response)
    }
}

#[async_trait]
impl MessageApi for DiscordClient {
    async fn send_message(
        &self,
        channel_id: &str,
        content: &str,
        nonce: &str,
        suppress_notifications: bool,
    ) -> Result<String> {
        let url = self.messages_url(channel_id);
        debug!("Sending message to {} with nonce {}", url, nonce);

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.config.token)
            .json(&SendMessageBody::new(content, nonce, suppress_notifications))
            .send()
            .await
            .context("Failed to send message request")?;

        let created: CreatedMessage = Self::ensure_success(response, "send")
            .await?
            .json()
            .await
            .context("Failed to parse created message")?;

        Ok(created.id)
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<()> {
        let url = self.message_url(channel_id, message_id);
        debug!("Deleting message: {}", url);

        let response = self
            .client
            .delete(&url)
            .header("Authorization", &self.config.token)
            .send()
            .await
            .context("Failed to send delete request")?;

        Self::ensure_success(response, "delete").await?;
        Ok(())
    }

    async fn fetch_messages(
        &self,
        channel_id: &str,
        limit: u8,
        before: Option<&str>,
    ) -> Result<Vec<HistoryMessage>> {
        let url = self.messages_url(channel_id);
        let mut query = vec![("limit", limit.min(MAX_PAGE_SIZE).to_string())];
        if let Some(before) = before {
            query.push(("before", before.to_string()));
        }
        debug!("Fetching history from {} (before: {:?})", url, before);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.config.token)
            .query(&query)
            .send()
            .await
            .context("Failed to send history request")?;

        Self::ensure_success(response, "fetch")
            .await?
            .json()
            .await
            .context("Failed to parse message history")
    }

    async fn current_user_id(&self) -> Result<String> {
        if let Some(id) = &self.config.user_id {
            return Ok(id.clone());
        }

        let url = format!("{}/users/@me", self.config.api_base.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.config.token)
            .send()
            .await
            .context("Failed to send current user request")?;

        let user: CurrentUser = Self::ensure_success(response, "current user")
            .await?
            .json()
            .await
            .context("Failed to parse current user")?;

        Ok(user.id)
    }
}
