//! Configuration management for vigiad.
//!
//! Loads settings from /etc/vigia/config.toml or uses defaults.
//! The review threshold is policy, not configuration, and is not read here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/vigia/config.toml";

/// Default config file path for fallback
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/vigia/config.toml";

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the gateway listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Upstream classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Classifier endpoint, called with POST
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Upper bound for one classifier call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// JSON key the classifier expects the text under
    #[serde(default = "default_text_field")]
    pub text_field: String,
}

fn default_endpoint() -> String {
    "http://vigia-ml:8000/analisar".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_text_field() -> String {
    "text".to_string()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            text_field: default_text_field(),
        }
    }
}

impl ClassifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Reasons a loaded config is refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("classifier.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("classifier.text_field must not be empty")]
    EmptyTextField,

    #[error("classifier.endpoint is not a valid URL: {0}")]
    InvalidEndpoint(String),

    #[error("server.bind is not a valid socket address: {0}")]
    InvalidBind(String),
}

impl Config {
    /// Load config from default locations, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_first_of(&[CONFIG_PATH, DEFAULT_CONFIG_PATH])
    }

    /// Load the first candidate that exists. Only a missing file moves on to
    /// the next candidate; unreadable or malformed files are errors.
    pub fn load_first_of<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        for path in candidates {
            let path = path.as_ref();
            match fs::read_to_string(path) {
                Ok(content) => return Self::parse(path, &content),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to read config {}", path.display()))
                }
            }
        }
        warn!("Config not found, using defaults");
        Ok(Config::default())
    }

    /// Load config from specific path
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check values that would otherwise fail late, at first request
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.classifier.text_field.trim().is_empty() {
            return Err(ConfigError::EmptyTextField);
        }
        if let Err(e) = reqwest::Url::parse(&self.classifier.endpoint) {
            return Err(ConfigError::InvalidEndpoint(format!(
                "{} ({})",
                self.classifier.endpoint, e
            )));
        }
        self.bind_addr()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.server.bind.clone()))
    }
}
