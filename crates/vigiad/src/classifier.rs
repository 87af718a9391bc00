//! Classifier client abstraction.
//!
//! Production code uses `HttpClassifier`, which POSTs to the configured
//! endpoint. Test code uses `FakeClassifier` with a pre-configured behaviour.
//!
//! Implementations only move bytes: contract validation and policy live in
//! the evaluator, so every classifier is held to the same rules.

use crate::config::ClassifierConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use vigia_shared::FailureKind;

// ============================================================================
// Classifier Trait
// ============================================================================

/// Transport-level classifier failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Classifier timed out")]
    Timeout,

    #[error("Classifier returned HTTP {0}")]
    Status(u16),

    #[error("Classifier body is not JSON: {0}")]
    InvalidBody(String),
}

impl ClassifierError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ClassifierError::Network(_) | ClassifierError::Timeout | ClassifierError::Status(_) => {
                FailureKind::UpstreamUnavailable
            }
            ClassifierError::InvalidBody(_) => FailureKind::UnexpectedFault,
        }
    }
}

/// One attempt at classifying a text. No retries.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Send the text upstream and return the raw JSON body
    async fn classify(&self, text: &str) -> Result<Value, ClassifierError>;
}

// ============================================================================
// HTTP Classifier (Production)
// ============================================================================

pub struct HttpClassifier {
    http: reqwest::Client,
    endpoint: String,
    text_field: String,
}

impl HttpClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("vigiad/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            text_field: config.text_field.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(e: reqwest::Error) -> ClassifierError {
    if e.is_timeout() {
        ClassifierError::Timeout
    } else {
        ClassifierError::Network(e.to_string())
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<Value, ClassifierError> {
        let mut body = Map::new();
        body.insert(self.text_field.clone(), Value::String(text.to_string()));

        debug!("POST {} ({} bytes of text)", self.endpoint, text.len());
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| ClassifierError::InvalidBody(e.to_string()))
    }
}

// ============================================================================
// Fake Classifier (Testing)
// ============================================================================

/// Pre-configured classifier behaviour for testing
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    Respond(Value),
    Fail(ClassifierError),
    Delay(Duration, Value),
    Panic,
}

/// Fake classifier that never touches the network
pub struct FakeClassifier {
    behavior: FakeBehavior,
    calls: AtomicUsize,
}

impl FakeClassifier {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn responding(body: Value) -> Self {
        Self::new(FakeBehavior::Respond(body))
    }

    pub fn failing(error: ClassifierError) -> Self {
        Self::new(FakeBehavior::Fail(error))
    }

    pub fn delayed(delay: Duration, body: Value) -> Self {
        Self::new(FakeBehavior::Delay(delay, body))
    }

    pub fn panicking() -> Self {
        Self::new(FakeBehavior::Panic)
    }

    /// Number of classify calls received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for FakeClassifier {
    async fn classify(&self, _text: &str) -> Result<Value, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            FakeBehavior::Respond(body) => Ok(body.clone()),
            FakeBehavior::Fail(error) => Err(error.clone()),
            FakeBehavior::Delay(delay, body) => {
                tokio::time::sleep(*delay).await;
                Ok(body.clone())
            }
            FakeBehavior::Panic => panic!("fake classifier fault"),
        }
    }
}
