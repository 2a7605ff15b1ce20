//! HTTP client for the remote persistence API.
//!
//! Every operation targets the configured base endpoint, reports non-2xx
//! responses as [`RequestError`] with a readable description, and applies a
//! bounded request timeout (also surfaced as [`RequestError`]). Failures
//! are never retried here; the user re-triggers the action.

use std::time::Duration;

use url::Url;

use crate::error::{CoreError, RequestError};
use crate::models::{EntryId, UserId};
use crate::storage::Config;

use super::types::{
    ChatReply, ChatRequest, DiaryRecord, HistoryRecord, SaveDiaryRequest, SaveMessageRequest,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed request/response contract against the backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, base })
    }

    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        let base = config.api_base_url()?;
        Ok(Self::new(base)?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        Ok(self.base.join(path)?)
    }

    /// Map a non-success status to an error carrying the endpoint name.
    fn check(resp: reqwest::Response, endpoint: &str) -> Result<reqwest::Response, RequestError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(RequestError::Status {
                endpoint: endpoint.to_string(),
                status: resp.status().as_u16(),
            })
        }
    }

    /// `GET /get-history/{userId}/{channel}`
    pub async fn fetch_history(
        &self,
        user: &UserId,
        channel: &str,
    ) -> Result<Vec<HistoryRecord>, RequestError> {
        let url = self.endpoint(&format!("get-history/{user}/{channel}"))?;
        let resp = self.http.get(url).send().await?;
        let resp = Self::check(resp, "get-history")?;
        Ok(resp.json().await?)
    }

    /// `POST /chat` -- returns the assistant reply text.
    pub async fn send_chat(
        &self,
        user: &UserId,
        message: &str,
        channel: &str,
    ) -> Result<String, RequestError> {
        let url = self.endpoint("chat")?;
        let body = ChatRequest {
            user_id: user.as_str(),
            message,
            chat_type: channel,
        };
        let resp = self.http.post(url).json(&body).send().await?;
        let resp = Self::check(resp, "chat")?;
        let reply: ChatReply = resp.json().await?;
        match reply.reply {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(RequestError::MalformedPayload {
                endpoint: "chat".to_string(),
                message: "payload lacks a reply".to_string(),
            }),
        }
    }

    /// `POST /save-message` -- best-effort persistence of a completed
    /// exchange. The caller surfaces a failure but never rolls back the
    /// already-displayed messages.
    pub async fn persist_chat(
        &self,
        user: &UserId,
        message: &str,
        reply: &str,
        channel: &str,
    ) -> Result<(), RequestError> {
        let url = self.endpoint("save-message")?;
        let body = SaveMessageRequest {
            user_id: user.as_str(),
            message,
            response: reply,
            chat_type: channel,
        };
        let resp = self.http.post(url).json(&body).send().await?;
        Self::check(resp, "save-message").map(|_| ())
    }

    /// `GET /get-diary/{userId}`
    pub async fn list_diary(&self, user: &UserId) -> Result<Vec<DiaryRecord>, RequestError> {
        let url = self.endpoint(&format!("get-diary/{user}"))?;
        let resp = self.http.get(url).send().await?;
        let resp = Self::check(resp, "get-diary")?;
        Ok(resp.json().await?)
    }

    /// `POST /save-diary`
    pub async fn create_diary(&self, user: &UserId, content: &str) -> Result<(), RequestError> {
        let url = self.endpoint("save-diary")?;
        let body = SaveDiaryRequest {
            user_id: user.as_str(),
            content,
        };
        let resp = self.http.post(url).json(&body).send().await?;
        Self::check(resp, "save-diary").map(|_| ())
    }

    /// `DELETE /delete-diary/{id}`
    pub async fn delete_diary(&self, id: &EntryId) -> Result<(), RequestError> {
        let url = self.endpoint(&format!("delete-diary/{id}"))?;
        let resp = self.http.delete(url).send().await?;
        Self::check(resp, "delete-diary").map(|_| ())
    }
}
