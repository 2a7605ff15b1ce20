//! Journal state: validated saves, explicit deletes, and the rule that the
//! displayed list is always re-read from the authoritative backing store
//! after a mutation rather than locally spliced.
//!
//! Remote failures become notices (no retry, no mutation); validation
//! failures are returned before any request is issued.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{CoreError, RequestError, ValidationError};
use crate::models::{EntryId, JournalEntry, UserId};
use crate::notice::NoticeQueue;
use crate::remote::ApiClient;
use crate::storage::snapshot::JOURNAL_ENTRIES_KEY;
use crate::storage::SnapshotStore;

/// In-memory journal entry list.
#[derive(Debug, Default)]
pub struct JournalController {
    entries: Vec<JournalEntry>,
}

impl JournalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Drop all journal state (session teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // ── Local-only mode ──────────────────────────────────────────────

    pub fn load_local(&mut self, store: &SnapshotStore) {
        self.entries = store.load(JOURNAL_ENTRIES_KEY);
    }

    /// Save a new entry to the snapshot store, then reload the list from
    /// it so the display matches store truth.
    pub fn save_local(
        &mut self,
        store: &SnapshotStore,
        title: Option<&str>,
        body: &str,
        notices: &mut NoticeQueue,
    ) -> Result<(), CoreError> {
        let title = validate_entry(title, body)?;
        let entry = JournalEntry::new(
            EntryId::Str(Uuid::new_v4().to_string()),
            title,
            body,
            Utc::now(),
        );
        self.entries.push(entry);
        store.save(JOURNAL_ENTRIES_KEY, &self.entries)?;
        self.load_local(store);
        notices.info("Entrada salva", "Sua reflexão foi salva com sucesso.");
        Ok(())
    }

    /// Delete an entry from the snapshot store, then reload the list.
    pub fn delete_local(
        &mut self,
        store: &SnapshotStore,
        id: &EntryId,
        notices: &mut NoticeQueue,
    ) -> Result<(), CoreError> {
        self.entries.retain(|entry| entry.id != *id);
        store.save(JOURNAL_ENTRIES_KEY, &self.entries)?;
        self.load_local(store);
        notices.info("Entrada excluída", "A entrada foi removida com sucesso.");
        Ok(())
    }

    // ── Remote-backed mode ───────────────────────────────────────────

    /// Replace the list with the server's, splitting the flat content into
    /// structured title/body at this boundary.
    pub async fn refresh_remote(
        &mut self,
        client: &ApiClient,
        user: &UserId,
    ) -> Result<(), RequestError> {
        let records = client.list_diary(user).await?;
        self.entries = records
            .into_iter()
            .map(|r| JournalEntry::from_flat(r.id, &r.content, r.created_at))
            .collect();
        Ok(())
    }

    /// Create an entry remotely, then re-fetch the authoritative list.
    /// A failed create leaves the list untouched and yields one notice.
    pub async fn save_remote(
        &mut self,
        client: &ApiClient,
        user: &UserId,
        title: Option<&str>,
        body: &str,
        notices: &mut NoticeQueue,
    ) -> Result<(), CoreError> {
        let title = validate_entry(title, body)?;
        let flat = match &title {
            Some(t) => format!("{t}\n{body}"),
            None => body.to_string(),
        };
        match client.create_diary(user, &flat).await {
            Ok(()) => {
                if let Err(err) = self.refresh_remote(client, user).await {
                    notices.error("Erro", err.to_string());
                } else {
                    notices.info("Entrada salva", "Sua reflexão foi salva com sucesso.");
                }
            }
            Err(err) => notices.error("Erro", err.to_string()),
        }
        Ok(())
    }

    /// Delete an entry remotely, then re-fetch the authoritative list.
    /// A failed delete (including an unknown id) mutates nothing and
    /// yields exactly one notice.
    pub async fn delete_remote(
        &mut self,
        client: &ApiClient,
        user: &UserId,
        id: &EntryId,
        notices: &mut NoticeQueue,
    ) -> Result<(), CoreError> {
        match client.delete_diary(id).await {
            Ok(()) => {
                if let Err(err) = self.refresh_remote(client, user).await {
                    notices.error("Erro", err.to_string());
                } else {
                    notices.info("Entrada excluída", "A entrada foi removida com sucesso.");
                }
            }
            Err(err) => notices.error("Erro", err.to_string()),
        }
        Ok(())
    }
}

/// Blank bodies are rejected; blank titles collapse to `None`; a newline
/// inside a title would make the flat form ambiguous.
fn validate_entry(
    title: Option<&str>,
    body: &str,
) -> Result<Option<String>, ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyField("entry"));
    }
    match title {
        Some(t) if t.contains('\n') => Err(ValidationError::TitleContainsNewline),
        Some(t) if t.trim().is_empty() => Ok(None),
        Some(t) => Ok(Some(t.to_string())),
        None => Ok(None),
    }
}
