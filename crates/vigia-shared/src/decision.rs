//! Decision shaping.
//!
//! A decision is always produced: either from a valid classifier response or
//! from the fallback path. The two shapes are kept apart so that "classifier
//! said no risk" can never be confused with "we don't know".

use crate::contract::ClassifierResponse;
use crate::policy::{suggest_action, SuggestedAction};
use serde::{Deserialize, Serialize};

/// Message attached to every fallback decision
pub const FALLBACK_MESSAGE: &str = "Could not analyze the text. Manual review is required.";

/// Status value carried by fallback decisions
pub const FALLBACK_STATUS: &str = "error";

/// Decision rendered from a valid classifier response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedDecision {
    /// Passed through from the classifier; `null` when it sent none
    pub trace_id: Option<String>,
    pub contains_personal_data: bool,
    pub contains_sensitive_data: bool,
    pub decision_origin: Vec<String>,
    pub detected_types: Vec<String>,
    pub sensitive_categories: Vec<String>,
    pub confidence: f64,
    pub suggested_action: SuggestedAction,
}

impl EvaluatedDecision {
    /// Apply the publication policy to a validated response.
    pub fn from_response(response: ClassifierResponse) -> Self {
        let suggested_action =
            suggest_action(response.contains_sensitive_data, response.confidence);
        Self {
            trace_id: response.trace_id,
            contains_personal_data: response.contains_personal_data,
            contains_sensitive_data: response.contains_sensitive_data,
            decision_origin: response.decision_origin,
            detected_types: response.detected_types,
            sensitive_categories: response.sensitive_categories,
            confidence: response.confidence,
            suggested_action,
        }
    }
}

/// Conservative decision used whenever the classifier cannot be trusted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackDecision {
    /// Generated locally; the upstream id is never reused here
    pub trace_id: String,
    pub status: String,
    pub message: String,
    pub suggested_action: SuggestedAction,
}

impl FallbackDecision {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            status: FALLBACK_STATUS.to_string(),
            message: FALLBACK_MESSAGE.to_string(),
            suggested_action: SuggestedAction::ReviewBeforePublication,
        }
    }
}

/// Body returned to the caller on every non-validation outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Decision {
    Evaluated(EvaluatedDecision),
    Fallback(FallbackDecision),
}

impl Decision {
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Decision::Evaluated(d) => d.suggested_action,
            Decision::Fallback(d) => d.suggested_action,
        }
    }

    pub fn trace_id(&self) -> Option<&str> {
        match self {
            Decision::Evaluated(d) => d.trace_id.as_deref(),
            Decision::Fallback(d) => Some(d.trace_id.as_str()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Decision::Fallback(_))
    }

    /// `Some("error")` for fallbacks, `None` otherwise
    pub fn status(&self) -> Option<&str> {
        match self {
            Decision::Evaluated(_) => None,
            Decision::Fallback(d) => Some(d.status.as_str()),
        }
    }
}

impl From<EvaluatedDecision> for Decision {
    fn from(decision: EvaluatedDecision) -> Self {
        Decision::Evaluated(decision)
    }
}

impl From<FallbackDecision> for Decision {
    fn from(decision: FallbackDecision) -> Self {
        Decision::Fallback(decision)
    }
}
