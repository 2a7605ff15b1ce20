//! Core error types for slypy-core.
//!
//! Remote failures never crash the active view: callers catch them at the
//! call site and turn them into notices. Validation failures are rejected
//! before any request is issued.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for slypy-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Remote API request failed.
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// Input rejected before any request was issued.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Local snapshot could not be written.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic errors with context.
    #[error("{0}")]
    Custom(String),
}

/// A remote API call failed: non-2xx status, transport failure, or a
/// payload missing the fields the contract promises.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Backend answered with a non-success status.
    #[error("{endpoint} failed with HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Transport-level failure, including the bounded request timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedPayload { endpoint: String, message: String },

    /// Endpoint URL could not be built from the configured base.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Validation errors. No state mutation occurs when one is raised.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Required input was blank.
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),

    /// A journal title containing a newline would make the flat
    /// first-line-is-title form ambiguous.
    #[error("journal title must not contain a newline")]
    TitleContainsNewline,
}

/// Snapshot write failures. Reads never raise: a missing or corrupt blob
/// degrades to an empty collection instead.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to write snapshot '{key}': {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode snapshot '{key}': {source}")]
    EncodeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Configured API base URL is not a valid URL.
    #[error("Invalid API base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
