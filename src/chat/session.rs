// src/chat/session.rs
// The visible conversation log and its send/retry flow

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SiteConfig;

use super::assistant::Assistant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sending,
    Error,
}

/// One entry in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

/// What a retry needs to re-run a failed exchange: the error message to
/// drop and the user message the call was issued for.
#[derive(Debug, Clone)]
struct RetryState {
    failed_reply_id: String,
    user_id: String,
    content: String,
    recoverable: bool,
}

/// Holds the message log and drives the send/retry flow. Failures do
/// not bubble out of `send`; they land in the log as error-flagged
/// assistant messages, the same way replies land as regular ones.
pub struct ChatSession {
    assistant: Assistant,
    messages: Vec<ChatMessage>,
    retry: Option<RetryState>,
    reply_delay: Duration,
    last_id: i64,
}

impl ChatSession {
    /// Create a session seeded with the assistant's greeting.
    pub fn new(assistant: Assistant, site: &SiteConfig, reply_delay: Duration) -> Self {
        let mut session = Self {
            assistant,
            messages: Vec::new(),
            retry: None,
            reply_delay,
            last_id: 0,
        };
        let greeting = format!(
            "Hi! I'm {}'s portfolio assistant powered by Google's Gemini AI. How can I help you today?",
            site.owner
        );
        session.append(greeting, Sender::Assistant, None, None);
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether the last exchange failed with a recoverable error.
    /// Credential failures are excluded; resending the same text with
    /// the same bad key cannot succeed.
    pub fn can_retry(&self) -> bool {
        self.retry.as_ref().is_some_and(|r| r.recoverable)
    }

    /// Send one user message. Blank input is rejected without touching
    /// the log. Returns the appended bot message, reply or error;
    /// `None` when nothing was appended.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let content = input.trim();
        if content.is_empty() {
            return None;
        }

        let user_id = self.append(content.to_string(), Sender::User, None, None);
        self.dispatch(user_id, content.to_string()).await
    }

    /// Retry the last failed exchange: the error reply leaves the log,
    /// the user message stays put, and the same governed path runs
    /// again for it. Does nothing when there is no retryable failure.
    pub async fn resubmit(&mut self) -> Option<&ChatMessage> {
        if !self.can_retry() {
            return None;
        }
        let RetryState {
            failed_reply_id,
            user_id,
            content,
            ..
        } = self.retry.take()?;

        self.messages.retain(|m| m.id != failed_reply_id);
        self.dispatch(user_id, content).await
    }

    /// Run the governed call for one user message and record the
    /// outcome in the log.
    async fn dispatch(&mut self, user_id: String, content: String) -> Option<&ChatMessage> {
        self.set_status(&user_id, Some(MessageStatus::Sending));
        let outcome = self.assistant.request_completion(&content).await;

        // A retry may have dropped the originating message while this
        // call was in flight; its result must then be ignored
        if !self.contains(&user_id) {
            debug!(message_id = %user_id, "Dropping completion for a message no longer in the log");
            return None;
        }
        self.set_status(&user_id, None);

        match outcome {
            Ok(reply) => {
                // Small settle delay so the reply does not pop in
                // before the typing indicator is even visible
                tokio::time::sleep(self.reply_delay).await;
                self.append(reply, Sender::Assistant, None, None);
                self.retry = None;
            }
            Err(err) => {
                warn!(kind = err.kind(), "Chat completion failed: {}", err);
                let recoverable = err.is_recoverable();
                let failed_reply_id = self.append(
                    err.to_string(),
                    Sender::Assistant,
                    Some(MessageStatus::Error),
                    Some(err.kind().to_string()),
                );
                self.retry = Some(RetryState {
                    failed_reply_id,
                    user_id,
                    content,
                    recoverable,
                });
            }
        }

        self.messages.last()
    }

    fn append(
        &mut self,
        content: String,
        sender: Sender,
        status: Option<MessageStatus>,
        error_kind: Option<String>,
    ) -> String {
        let id = self.next_id();
        self.messages.push(ChatMessage {
            id: id.clone(),
            content,
            sender,
            created_at: Utc::now(),
            status,
            error_kind,
        });
        id
    }

    fn set_status(&mut self, id: &str, status: Option<MessageStatus>) {
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == id) {
            msg.status = status;
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    /// Epoch-millisecond ids, bumped past the previous one so two
    /// messages in the same millisecond still get distinct ids.
    fn next_id(&mut self) -> String {
        let mut id = Utc::now().timestamp_millis();
        if id <= self.last_id {
            id = self.last_id + 1;
        }
        self.last_id = id;
        id.to_string()
    }
}
