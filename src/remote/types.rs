//! Wire types for the remote API. All bodies are JSON; request bodies use
//! the backend's camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EntryId, Message, Sender};

/// One stored exchange from `GET /get-history/{userId}/{channel}`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRecord {
    #[serde(default)]
    pub id: i64,
    pub message: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    /// Expand into the user message followed by the assistant reply,
    /// preserving pair order. Derived ids keep the server row id.
    pub fn into_messages(self) -> [Message; 2] {
        [
            Message::at(
                format!("{}-user", self.id),
                self.message,
                Sender::User,
                self.timestamp,
            ),
            Message::at(
                format!("{}-assistant", self.id),
                self.response,
                Sender::Assistant,
                self.timestamp,
            ),
        ]
    }
}

/// Body for `POST /chat`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest<'a> {
    pub user_id: &'a str,
    pub message: &'a str,
    pub chat_type: &'a str,
}

/// Response of `POST /chat`. `reply` is optional so a payload missing it
/// can be reported as malformed instead of failing deserialization opaquely.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
}

/// Body for `POST /save-message`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMessageRequest<'a> {
    pub user_id: &'a str,
    pub message: &'a str,
    pub response: &'a str,
    pub chat_type: &'a str,
}

/// One entry from `GET /get-diary/{userId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiaryRecord {
    pub id: EntryId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /save-diary`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDiaryRequest<'a> {
    pub user_id: &'a str,
    pub content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_record_expands_user_then_assistant() {
        let record: HistoryRecord = serde_json::from_str(
            r#"{"id": 7, "message": "Estou ansioso", "response": "Respire fundo", "timestamp": "2024-06-01T12:00:00Z"}"#,
        )
        .unwrap();
        let [user, assistant] = record.into_messages();
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.id, "7-user");
        assert_eq!(user.content, "Estou ansioso");
        assert_eq!(assistant.sender, Sender::Assistant);
        assert_eq!(assistant.id, "7-assistant");
        assert_eq!(assistant.timestamp, user.timestamp);
    }

    #[test]
    fn chat_request_uses_backend_field_names() {
        let body = serde_json::to_value(ChatRequest {
            user_id: "u1",
            message: "oi",
            chat_type: "general",
        })
        .unwrap();
        assert_eq!(body["userId"], "u1");
        assert_eq!(body["chatType"], "general");
    }

    #[test]
    fn chat_reply_tolerates_missing_field() {
        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert!(reply.reply.is_none());
    }

    #[test]
    fn diary_record_parses_snake_case_timestamp() {
        let record: DiaryRecord = serde_json::from_str(
            r#"{"id": 3, "content": "Dia bom\ncorpo do texto", "created_at": "2024-06-02T08:15:00Z"}"#,
        )
        .unwrap();
        assert_eq!(record.id, EntryId::Num(3));
        assert!(record.content.starts_with("Dia bom"));
    }
}
