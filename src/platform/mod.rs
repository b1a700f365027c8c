pub mod commands;
pub mod hooks;

use async_trait::async_trait;
use tracing::info;

/// A message as the host client shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRef {
    pub channel_id: String,
    pub message_id: String,
    pub author_id: String,
    /// Already deleted on the server but still displayed (e.g. by a logger).
    pub deleted: bool,
}

impl MessageRef {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }
}

/// Local-only notices shown to the acting user, never sent to the server.
#[async_trait]
pub trait Notices: Send + Sync {
    async fn notify(&self, channel_id: &str, content: &str);
}

/// Prints notices to stdout for the command line front end.
pub struct ConsoleNotices;

#[async_trait]
impl Notices for ConsoleNotices {
    async fn notify(&self, channel_id: &str, content: &str) {
        info!("Notice for channel {}: {}", channel_id, content);
        println!("{}", content);
    }
}
