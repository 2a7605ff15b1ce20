//! Session controller: decides which store backs each feature and tears
//! state down at the session boundary.
//!
//! No userId means local-only mode for every feature; an authenticated
//! session routes chat and journal to the remote API. All collections tied
//! to a session are cleared on logout before any login view can become
//! reachable, so a new session can never observe the previous user's data.

use crate::breathing::BreathingSession;
use crate::chat::{ChatController, SendStatus};
use crate::error::CoreError;
use crate::journal::JournalController;
use crate::models::{EntryId, JournalEntry, Message, UserId};
use crate::notice::{Notice, NoticeQueue};
use crate::remote::ApiClient;
use crate::storage::{Config, SnapshotStore};

/// Which store backs chat and journal right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    Local,
    Remote,
}

/// Current authentication state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user_id: Option<UserId>,
}

/// Composition root for the session engine.
pub struct SessionController {
    session: Session,
    store: SnapshotStore,
    client: ApiClient,
    chat: ChatController,
    journal: JournalController,
    breathing: BreathingSession,
    notices: NoticeQueue,
}

impl SessionController {
    /// Build a controller in local-only mode with local state loaded.
    pub fn new(config: &Config, store: SnapshotStore) -> Result<Self, CoreError> {
        let client = ApiClient::from_config(config)?;
        let mut chat = ChatController::from_config(config);
        let mut journal = JournalController::new();
        chat.load_local(&store);
        journal.load_local(&store);
        Ok(Self {
            session: Session::default(),
            store,
            client,
            chat,
            journal,
            breathing: BreathingSession::new(config.breathing_pattern()),
            notices: NoticeQueue::new(),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current_user(&self) -> Option<&UserId> {
        self.session.user_id.as_ref()
    }

    pub fn backing(&self) -> Backing {
        if self.session.user_id.is_some() {
            Backing::Remote
        } else {
            Backing::Local
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.chat.messages()
    }

    pub fn journal_entries(&self) -> &[JournalEntry] {
        self.journal.entries()
    }

    pub fn breathing(&mut self) -> &mut BreathingSession {
        &mut self.breathing
    }

    /// Pending toasts for the presentation layer.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Begin a remote-backed session. Local-mode collections are purged
    /// first, then remote state is loaded; load failures become notices
    /// and leave the corresponding collection empty.
    pub async fn login(&mut self, user: UserId) {
        self.chat.clear();
        self.journal.clear();
        self.session.user_id = Some(user.clone());

        if let Err(err) = self.chat.load_remote(&self.client, &user).await {
            self.notices.error("Erro", err.to_string());
        }
        if let Err(err) = self.journal.refresh_remote(&self.client, &user).await {
            self.notices.error("Erro", err.to_string());
        }
    }

    /// End the session. Every collection tied to it is cleared and the
    /// breathing ticker stops before the login view becomes reachable.
    pub fn logout(&mut self) {
        self.chat.clear();
        self.journal.clear();
        self.breathing.stop();
        self.session.user_id = None;
    }

    // ── Feature routing ──────────────────────────────────────────────

    /// Send a chat message through whichever store backs the session.
    pub async fn send_chat(&mut self, input: &str) -> Result<SendStatus, CoreError> {
        match self.session.user_id.clone() {
            Some(user) => {
                self.chat
                    .send_remote(&self.client, &user, input, &mut self.notices)
                    .await
            }
            None => {
                self.chat.send_local(&self.store, input)?;
                Ok(SendStatus::Accepted)
            }
        }
    }

    /// Save a journal entry through whichever store backs the session.
    pub async fn save_journal_entry(
        &mut self,
        title: Option<&str>,
        body: &str,
    ) -> Result<(), CoreError> {
        match self.session.user_id.clone() {
            Some(user) => {
                self.journal
                    .save_remote(&self.client, &user, title, body, &mut self.notices)
                    .await
            }
            None => self
                .journal
                .save_local(&self.store, title, body, &mut self.notices),
        }
    }

    /// Delete a journal entry through whichever store backs the session.
    pub async fn delete_journal_entry(&mut self, id: &EntryId) -> Result<(), CoreError> {
        match self.session.user_id.clone() {
            Some(user) => {
                self.journal
                    .delete_remote(&self.client, &user, id, &mut self.notices)
                    .await
            }
            None => self.journal.delete_local(&self.store, id, &mut self.notices),
        }
    }
}
