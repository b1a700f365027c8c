//! In-memory fakes shared by the unit tests.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::Instant;

use crate::discord::{HistoryMessage, MessageApi, MessageAuthor};
use crate::platform::Notices;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send {
        channel_id: String,
        content: String,
        nonce: String,
        suppress_notifications: bool,
    },
    Delete {
        channel_id: String,
        message_id: String,
    },
    Fetch {
        channel_id: String,
        limit: u8,
        before: Option<String>,
    },
    CurrentUser,
}

/// Records every call together with the virtual time it happened at.
pub struct FakeApi {
    start: Instant,
    user_id: String,
    calls: Mutex<Vec<(Duration, Call)>>,
    pages: Mutex<VecDeque<Result<Vec<HistoryMessage>, String>>>,
    failing_deletes: Mutex<HashSet<String>>,
    fail_sends: Mutex<bool>,
    next_id: AtomicU64,
}

impl FakeApi {
    pub fn new(user_id: &str) -> Self {
        Self {
            start: Instant::now(),
            user_id: user_id.to_string(),
            calls: Mutex::new(Vec::new()),
            pages: Mutex::new(VecDeque::new()),
            failing_deletes: Mutex::new(HashSet::new()),
            fail_sends: Mutex::new(false),
            next_id: AtomicU64::new(1),
        }
    }

    /// Queue a history page; once the queue is drained fetches return empty pages.
    pub fn push_page(&self, page: Vec<HistoryMessage>) {
        self.pages.lock().unwrap().push_back(Ok(page));
    }

    pub fn push_fetch_error(&self, message: &str) {
        self.pages
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn fail_delete_of(&self, message_id: &str) {
        self.failing_deletes
            .lock()
            .unwrap()
            .insert(message_id.to_string());
    }

    pub fn fail_sends(&self) {
        *self.fail_sends.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, c)| c.clone())
            .collect()
    }

    pub fn timed_calls(&self) -> Vec<(Duration, Call)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete { message_id, .. } => Some(message_id),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap()
            .push((self.start.elapsed(), call));
    }
}

#[async_trait]
impl MessageApi for FakeApi {
    async fn send_message(
        &self,
        channel_id: &str,
        content: &str,
        nonce: &str,
        suppress_notifications: bool,
    ) -> Result<String> {
        self.record(Call::Send {
            channel_id: channel_id.to_string(),
            content: content.to_string(),
            nonce: nonce.to_string(),
            suppress_notifications,
        });
        if *self.fail_sends.lock().unwrap() {
            anyhow::bail!("send rejected");
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(format!("replacement-{}", n))
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<()> {
        self.record(Call::Delete {
            channel_id: channel_id.to_string(),
            message_id: message_id.to_string(),
        });
        if self.failing_deletes.lock().unwrap().contains(message_id) {
            anyhow::bail!("delete of {} rejected", message_id);
        }
        Ok(())
    }

    async fn fetch_messages(
        &self,
        channel_id: &str,
        limit: u8,
        before: Option<&str>,
    ) -> Result<Vec<HistoryMessage>> {
        self.record(Call::Fetch {
            channel_id: channel_id.to_string(),
            limit,
            before: before.map(str::to_string),
        });
        match self.pages.lock().unwrap().pop_front() {
            Some(Ok(page)) => Ok(page),
            Some(Err(e)) => Err(anyhow::anyhow!(e)),
            None => Ok(Vec::new()),
        }
    }

    async fn current_user_id(&self) -> Result<String> {
        self.record(Call::CurrentUser);
        Ok(self.user_id.clone())
    }
}

#[derive(Default)]
pub struct RecordingNotices {
    notices: Mutex<Vec<(String, String)>>,
}

impl RecordingNotices {
    pub fn notices(&self) -> Vec<(String, String)> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notices for RecordingNotices {
    async fn notify(&self, channel_id: &str, content: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((channel_id.to_string(), content.to_string()));
    }
}

pub fn message(id: &str, author_id: &str) -> HistoryMessage {
    HistoryMessage {
        id: id.to_string(),
        author: Some(MessageAuthor {
            id: author_id.to_string(),
        }),
    }
}

/// `len` messages with descending ids starting at `first_id`; those whose
/// position satisfies `own` are authored by `user_id`, the rest by "other".
pub fn page(first_id: u64, len: u64, user_id: &str, own: impl Fn(u64) -> bool) -> Vec<HistoryMessage> {
    (0..len)
        .map(|i| {
            let author = if own(i) { user_id } else { "other" };
            message(&(first_id - i).to_string(), author)
        })
        .collect()
}
