//! # Slypy Core Library
//!
//! Core session/state engine for Slypy, a wellness companion with three
//! interactive modes: a conversational assistant, a guided breathing
//! exercise, and a personal journal. The UI layer (routing, styling,
//! login form) is a thin shell over this crate.
//!
//! ## Architecture
//!
//! - **Breathing**: a caller-driven phase state machine plus the one
//!   owned ticker task that advances it each second
//! - **Storage**: JSON collection snapshots for local-only mode and
//!   TOML-based configuration
//! - **Remote**: typed client for the persistence API backing chat and
//!   journal when a session is authenticated
//! - **Controllers**: chat (optimistic append, single in-flight send),
//!   journal (authoritative re-fetch after mutation), and the session
//!   controller that selects local vs remote backing
//!
//! ## Key Components
//!
//! - [`BreathingSession`] / [`BreathCycle`]: breathing exercise engine
//! - [`SnapshotStore`] / [`Config`]: local persistence and configuration
//! - [`ApiClient`]: remote request/response contract
//! - [`SessionController`]: mode reconciliation and session teardown
//! - [`responder::respond`]: deterministic local-only replies

pub mod breathing;
pub mod chat;
pub mod error;
pub mod journal;
pub mod models;
pub mod notice;
pub mod remote;
pub mod responder;
pub mod session;
pub mod storage;

pub use breathing::{BreathCycle, BreathPattern, BreathPhase, BreathState, BreathingSession};
pub use chat::{ChatController, SendStatus};
pub use error::{ConfigError, CoreError, RequestError, SnapshotError, ValidationError};
pub use journal::JournalController;
pub use models::{EntryId, JournalEntry, Message, Sender, UserId};
pub use notice::{Notice, NoticeQueue, Severity};
pub use remote::ApiClient;
pub use session::{Backing, Session, SessionController};
pub use storage::{Config, SnapshotStore};
