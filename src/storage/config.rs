//! TOML-based application configuration.
//!
//! Stores:
//! - the remote API base URL (overridable via the SLYPY_API_URL env var)
//! - the default conversation channel and welcome message
//! - the breathing pattern variant
//!
//! Configuration is stored at `~/.config/slypy/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use super::data_dir;
use crate::breathing::BreathPattern;
use crate::error::ConfigError;

/// Env var overriding `api.base_url`.
pub const API_URL_ENV: &str = "SLYPY_API_URL";

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Chat configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Named conversation thread scoping chat history.
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Assistant message seeded when no history exists.
    #[serde(default = "default_welcome")]
    pub welcome_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    ThreePhase,
    FourPhase,
}

/// Breathing exercise configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_pattern")]
    pub pattern: PatternKind,
    #[serde(default = "default_phase_secs")]
    pub phase_secs: u8,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/slypy/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub breathing: BreathingConfig,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:3000".into()
}
fn default_channel() -> String {
    "general".into()
}
fn default_welcome() -> String {
    "Olá! Sou Slypy, seu assistente zen. Como posso ajudá-lo hoje?".into()
}
fn default_pattern() -> PatternKind {
    PatternKind::ThreePhase
}
fn default_phase_secs() -> u8 {
    4
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            welcome_message: default_welcome(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            phase_secs: default_phase_secs(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/slypy"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Save to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Effective API base URL: the SLYPY_API_URL env var when set,
    /// otherwise the configured (or default local development) endpoint.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let raw = std::env::var(API_URL_ENV).unwrap_or_else(|_| self.api.base_url.clone());
        Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw,
            message: e.to_string(),
        })
    }

    /// Breathing pattern selected by configuration.
    pub fn breathing_pattern(&self) -> BreathPattern {
        let mut pattern = match self.breathing.pattern {
            PatternKind::ThreePhase => BreathPattern::three_phase(),
            PatternKind::FourPhase => BreathPattern::four_phase(),
        };
        // The counter lives in [1, phase_secs]; a zero would advance a
        // phase on every tick.
        pattern.phase_secs = self.breathing.phase_secs.max(1);
        pattern
    }
}
