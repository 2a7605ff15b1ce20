//! Whole-collection JSON snapshots on a flat key-value substrate.
//!
//! Each key maps to one `<key>.json` file under the data directory and is
//! written as a single blob (atomic at blob granularity; concurrent writers
//! of the same key are last-writer-wins). Loading a missing or corrupt blob
//! yields the empty collection and the caller seeds defaults.
//!
//! Instants round-trip exactly: `DateTime<Utc>` fields serialize as RFC 3339
//! strings and deserialize back to equal instants.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SnapshotError;

/// Snapshot key for the chat message mirror.
pub const CHAT_MESSAGES_KEY: &str = "chatMessages";
/// Snapshot key for local-only journal entries.
pub const JOURNAL_ENTRIES_KEY: &str = "journalEntries";

/// Read/write access to per-key collection snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Open the store at the default data directory.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            dir: super::data_dir()?,
        })
    }

    /// Open the store at an explicit directory (tests use a temp dir).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load the collection stored under `key`.
    ///
    /// A missing blob means nothing was ever saved; a corrupt blob is
    /// treated the same way rather than crashing the view. Both yield an
    /// empty collection.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    /// Replace the collection stored under `key` with `items`.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), SnapshotError> {
        let content =
            serde_json::to_string_pretty(items).map_err(|source| SnapshotError::EncodeFailed {
                key: key.to_string(),
                source,
            })?;
        std::fs::write(self.path(key), content).map_err(|source| SnapshotError::WriteFailed {
            key: key.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, Sender};
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn store() -> (tempfile::TempDir, SnapshotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::at(dir.path());
        (dir, store)
    }

    #[test]
    fn missing_key_loads_empty() {
        let (_dir, store) = store();
        let messages: Vec<Message> = store.load(CHAT_MESSAGES_KEY);
        assert!(messages.is_empty());
    }

    #[test]
    fn corrupt_blob_loads_empty() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("chatMessages.json"), "{not json]").unwrap();
        let messages: Vec<Message> = store.load(CHAT_MESSAGES_KEY);
        assert!(messages.is_empty());
    }

    #[test]
    fn save_then_load_round_trips_instants() {
        let (_dir, store) = store();
        let sent = Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 5).unwrap();
        let messages = vec![Message::at("1", "Olá", Sender::User, sent)];
        store.save(CHAT_MESSAGES_KEY, &messages).unwrap();

        let loaded: Vec<Message> = store.load(CHAT_MESSAGES_KEY);
        assert_eq!(loaded, messages);
        // The timestamp comes back as an instant, equal to the original.
        assert_eq!(loaded[0].timestamp, sent);
    }

    #[test]
    fn save_replaces_whole_collection() {
        let (_dir, store) = store();
        store
            .save(CHAT_MESSAGES_KEY, &[Message::user("1", "a"), Message::user("2", "b")])
            .unwrap();
        store.save(CHAT_MESSAGES_KEY, &[Message::user("3", "c")]).unwrap();

        let loaded: Vec<Message> = store.load(CHAT_MESSAGES_KEY);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].content, "c");
    }

    proptest! {
        /// Arbitrary timestamps survive the blob round trip as instants.
        #[test]
        fn arbitrary_instants_round_trip(millis in 0i64..4_102_444_800_000) {
            let (_dir, store) = store();
            let at: DateTime<Utc> = Utc.timestamp_millis_opt(millis).unwrap();
            let messages = vec![Message::at("1", "x", Sender::Assistant, at)];
            store.save(CHAT_MESSAGES_KEY, &messages).unwrap();
            let loaded: Vec<Message> = store.load(CHAT_MESSAGES_KEY);
            prop_assert_eq!(loaded[0].timestamp, at);
        }
    }
}
