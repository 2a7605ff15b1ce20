//! User-visible notices.
//!
//! The toast sink is an external collaborator: core operations push notices
//! here and the presentation layer drains the queue. Every failed remote
//! call produces exactly one error notice; no failure crashes a view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// One toast-style notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity: Severity::Error,
        }
    }
}

/// FIFO queue of pending notices, drained by the presentation layer.
#[derive(Debug, Default)]
pub struct NoticeQueue {
    queue: Vec<Notice>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.queue.push(notice);
    }

    pub fn info(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.push(Notice::info(title, body));
    }

    pub fn error(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.push(Notice::error(title, body));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> &[Notice] {
        &self.queue
    }

    /// Take all pending notices, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.queue)
    }
}
