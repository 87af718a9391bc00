//! Decision evaluator.
//!
//! Validate → classify → check contract → apply policy → shape. Every failure
//! after validation ends in a `FallbackDecision`; only invalid input comes
//! back as an error, through `Outcome::Rejected`.
//!
//! The submitted text is never logged.

use crate::classifier::{Classifier, ClassifierError};
use crate::trace_id::{TraceIdGenerator, UuidTraceIds};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use vigia_shared::{
    AnalysisRequest, ClassifierResponse, ContractError, Decision, EvaluatedDecision,
    FailureKind, FallbackDecision, ValidationError,
};

/// Upper bound on one evaluation when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Policy decision or fallback; either way the caller gets a decision
    Decided(Decision),
    /// Input was unusable; nothing was sent upstream
    Rejected(ValidationError),
}

impl Outcome {
    pub fn decision(&self) -> Option<&Decision> {
        match self {
            Outcome::Decided(d) => Some(d),
            Outcome::Rejected(_) => None,
        }
    }
}

/// Everything that sends an evaluation to the fallback path
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("evaluation exceeded {0:?}")]
    Timeout(Duration),

    #[error("evaluation task panicked: {0}")]
    Panicked(String),

    #[error("evaluation task was cancelled")]
    Cancelled,
}

impl EvaluationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            EvaluationError::Classifier(e) => e.kind(),
            EvaluationError::Contract(_) => FailureKind::ContractViolation,
            EvaluationError::Timeout(_) => FailureKind::UpstreamUnavailable,
            EvaluationError::Panicked(_) | EvaluationError::Cancelled => {
                FailureKind::UnexpectedFault
            }
        }
    }
}

/// Stateless per call; clone freely and share across requests.
#[derive(Clone)]
pub struct DecisionEvaluator {
    classifier: Arc<dyn Classifier>,
    trace_ids: Arc<dyn TraceIdGenerator>,
    timeout: Duration,
}

impl DecisionEvaluator {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            trace_ids: Arc::new(UuidTraceIds),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_trace_ids(mut self, trace_ids: Arc<dyn TraceIdGenerator>) -> Self {
        self.trace_ids = trace_ids;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate raw text, then decide.
    pub async fn evaluate(&self, text: &str) -> Outcome {
        match AnalysisRequest::new(text) {
            Ok(request) => Outcome::Decided(self.decide(request).await),
            Err(e) => {
                info!("Rejected analysis request: {}", e);
                Outcome::Rejected(e)
            }
        }
    }

    /// Decide on an already validated request. Never fails.
    pub async fn decide(&self, request: AnalysisRequest) -> Decision {
        match self.try_decide(request).await {
            Ok(decision) => {
                info!(
                    "Decision rendered: action={} trace_id={}",
                    decision.suggested_action,
                    decision.trace_id.as_deref().unwrap_or("-")
                );
                Decision::Evaluated(decision)
            }
            Err(e) => Decision::Fallback(self.fallback(&e)),
        }
    }

    async fn try_decide(&self, request: AnalysisRequest) -> Result<EvaluatedDecision, EvaluationError> {
        let classifier = Arc::clone(&self.classifier);

        // Own task so a panic anywhere below surfaces as a JoinError
        let mut task = tokio::spawn(async move {
            let body = classifier.classify(request.text()).await?;
            let response = ClassifierResponse::from_value(body)?;
            Ok::<_, EvaluationError>(EvaluatedDecision::from_response(response))
        });

        match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) if join_error.is_panic() => {
                Err(EvaluationError::Panicked(join_error.to_string()))
            }
            Ok(Err(_)) => Err(EvaluationError::Cancelled),
            Err(_) => {
                task.abort();
                Err(EvaluationError::Timeout(self.timeout))
            }
        }
    }

    fn fallback(&self, error: &EvaluationError) -> FallbackDecision {
        let trace_id = self.trace_ids.next_id();
        warn!(
            "Fallback decision [{}] trace_id={}: {}",
            error.kind(),
            trace_id,
            error
        );
        FallbackDecision::new(trace_id)
    }
}
