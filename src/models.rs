//! Domain models shared across chat, journal, and storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authenticated user identifier supplied by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// A single chat message. Immutable once created; owned by the in-memory
/// conversation list and mirrored to the snapshot store in local-only mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique, monotonic-enough for display ordering.
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::at(id, content, Sender::User, Utc::now())
    }

    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::at(id, content, Sender::Assistant, Utc::now())
    }

    pub fn at(
        id: impl Into<String>,
        content: impl Into<String>,
        sender: Sender,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            sender,
            timestamp,
        }
    }
}

/// Journal entry identifier: numeric when server-assigned, string (UUID)
/// when generated client-side in local-only mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Num(i64),
    Str(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Num(n) => write!(f, "{n}"),
            EntryId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntryId {
    fn from(n: i64) -> Self {
        EntryId::Num(n)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId::Str(s.to_string())
    }
}

/// A journal entry. Created on save, deleted on explicit delete, never
/// mutated in place.
///
/// Title and body are always structured here. The legacy flat form (one
/// string whose first line is the title) exists only at the wire and
/// snapshot boundaries via [`JournalEntry::from_flat`] / [`JournalEntry::to_flat`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(
        id: EntryId,
        title: Option<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            body: body.into(),
            created_at,
        }
    }

    /// Build an entry from the flat concatenated form used by the remote
    /// contract: when the content has more than one line the first line is
    /// the title, otherwise the whole content is the body.
    pub fn from_flat(id: EntryId, content: &str, created_at: DateTime<Utc>) -> Self {
        match content.split_once('\n') {
            Some((title, body)) => Self {
                id,
                title: Some(title.to_string()),
                body: body.to_string(),
                created_at,
            },
            None => Self {
                id,
                title: None,
                body: content.to_string(),
                created_at,
            },
        }
    }

    /// Join back into the flat form. Inverse of [`JournalEntry::from_flat`]
    /// as long as the title contains no newline, which validation enforces.
    pub fn to_flat(&self) -> String {
        match &self.title {
            Some(title) => format!("{title}\n{}", self.body),
            None => self.body.clone(),
        }
    }
}
