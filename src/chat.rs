//! Conversation state: optimistic append, single in-flight send, and the
//! local-only responder mode.
//!
//! Remote-call failures are converted into notices here (the operation is
//! abandoned, never retried automatically); validation failures are
//! returned as errors before any state mutation so the caller can surface
//! them inline.

use chrono::Utc;

use crate::error::{CoreError, RequestError, ValidationError};
use crate::models::{Message, UserId};
use crate::notice::NoticeQueue;
use crate::remote::ApiClient;
use crate::responder;
use crate::storage::snapshot::CHAT_MESSAGES_KEY;
use crate::storage::{Config, SnapshotStore};

/// Outcome of a send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// The message was appended and the exchange ran (or is running).
    Accepted,
    /// A send is already in flight on this channel; the attempt was a no-op.
    Busy,
}

/// In-memory conversation list for one channel.
#[derive(Debug)]
pub struct ChatController {
    channel: String,
    welcome: String,
    messages: Vec<Message>,
    send_in_flight: bool,
    /// Last issued message id, for the monotonic bump on collisions.
    last_id_ms: i64,
}

impl ChatController {
    pub fn new(channel: impl Into<String>, welcome: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            welcome: welcome.into(),
            messages: Vec::new(),
            send_in_flight: false,
            last_id_ms: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.chat.channel, &config.chat.welcome_message)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_send_in_flight(&self) -> bool {
        self.send_in_flight
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Load the local snapshot mirror; seed the welcome message when no
    /// blob exists. The seed itself is not persisted until the first send.
    pub fn load_local(&mut self, store: &SnapshotStore) {
        self.messages = store.load(CHAT_MESSAGES_KEY);
        if self.messages.is_empty() {
            self.seed_welcome();
        }
    }

    /// Fetch remote history for this channel. Each stored pair expands into
    /// a user message then an assistant message; empty history seeds the
    /// welcome message.
    pub async fn load_remote(
        &mut self,
        client: &ApiClient,
        user: &UserId,
    ) -> Result<(), RequestError> {
        let history = client.fetch_history(user, &self.channel).await?;
        self.messages = history
            .into_iter()
            .flat_map(|record| record.into_messages())
            .collect();
        if self.messages.is_empty() {
            self.seed_welcome();
        }
        Ok(())
    }

    /// Drop all conversation state (session teardown).
    pub fn clear(&mut self) {
        self.messages.clear();
        self.send_in_flight = false;
    }

    // ── Sending ──────────────────────────────────────────────────────

    /// Local-only send: append the user message, answer with the keyword
    /// responder, and mirror the whole list to the snapshot store.
    pub fn send_local(&mut self, store: &SnapshotStore, input: &str) -> Result<(), CoreError> {
        validate_message(input)?;
        let user_msg = Message::user(self.next_id(), input);
        self.messages.push(user_msg);
        let reply = responder::respond(input);
        let assistant_msg = Message::assistant(self.next_id(), reply);
        self.messages.push(assistant_msg);
        store.save(CHAT_MESSAGES_KEY, &self.messages)?;
        Ok(())
    }

    /// First half of a remote send: validate, reject when a send is already
    /// in flight, otherwise optimistically append the user message and mark
    /// the channel busy.
    pub fn begin_send(&mut self, input: &str) -> Result<SendStatus, ValidationError> {
        validate_message(input)?;
        if self.send_in_flight {
            return Ok(SendStatus::Busy);
        }
        let user_msg = Message::user(self.next_id(), input);
        self.messages.push(user_msg);
        self.send_in_flight = true;
        Ok(SendStatus::Accepted)
    }

    /// Second half of a remote send. The optimistic user message stays in
    /// place either way; a failure yields exactly one error notice and no
    /// assistant message.
    pub fn complete_send(
        &mut self,
        outcome: Result<String, RequestError>,
        notices: &mut NoticeQueue,
    ) {
        self.send_in_flight = false;
        match outcome {
            Ok(reply) => {
                let assistant_msg = Message::assistant(self.next_id(), reply);
                self.messages.push(assistant_msg);
            }
            Err(err) => notices.error("Erro", err.to_string()),
        }
    }

    /// Full remote exchange: optimistic append, round-trip, reply append,
    /// then best-effort persistence of the completed pair.
    pub async fn send_remote(
        &mut self,
        client: &ApiClient,
        user: &UserId,
        input: &str,
        notices: &mut NoticeQueue,
    ) -> Result<SendStatus, CoreError> {
        if self.begin_send(input)? == SendStatus::Busy {
            return Ok(SendStatus::Busy);
        }
        match client.send_chat(user, input, &self.channel).await {
            Ok(reply) => {
                self.complete_send(Ok(reply.clone()), notices);
                // No compensating transaction: a failed save never removes
                // the displayed messages.
                if let Err(err) = client.persist_chat(user, input, &reply, &self.channel).await {
                    notices.error("Erro ao salvar conversa", err.to_string());
                }
            }
            Err(err) => self.complete_send(Err(err), notices),
        }
        Ok(SendStatus::Accepted)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn seed_welcome(&mut self) {
        let welcome = Message::assistant(self.next_id(), self.welcome.clone());
        self.messages.push(welcome);
    }

    /// Epoch-millisecond id, bumped when two messages land on the same
    /// millisecond so ids stay unique and ordered.
    fn next_id(&mut self) -> String {
        let mut ms = Utc::now().timestamp_millis();
        if ms <= self.last_id_ms {
            ms = self.last_id_ms + 1;
        }
        self.last_id_ms = ms;
        ms.to_string()
    }
}

fn validate_message(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        Err(ValidationError::EmptyField("message"))
    } else {
        Ok(())
    }
}
