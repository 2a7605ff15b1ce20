//! Typed client for the remote persistence API.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{ChatReply, DiaryRecord, HistoryRecord};
