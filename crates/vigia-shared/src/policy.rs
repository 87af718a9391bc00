//! Publication policy: data-protection review rule.
//!
//! Either signal alone forces human review. The rule is deliberately
//! one-sided: there is no path from a strong signal to automatic publication.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence at or above which review is required (inclusive)
pub const REVIEW_CONFIDENCE_THRESHOLD: f64 = 0.60;

/// Action recommended to the publisher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    ReviewBeforePublication,
    AutomaticPublication,
}

impl SuggestedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestedAction::ReviewBeforePublication => "review_before_publication",
            SuggestedAction::AutomaticPublication => "automatic_publication",
        }
    }

    pub fn requires_review(&self) -> bool {
        matches!(self, SuggestedAction::ReviewBeforePublication)
    }
}

impl fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map classifier signals to a suggested action.
pub fn suggest_action(contains_sensitive_data: bool, confidence: f64) -> SuggestedAction {
    if contains_sensitive_data || confidence >= REVIEW_CONFIDENCE_THRESHOLD {
        SuggestedAction::ReviewBeforePublication
    } else {
        SuggestedAction::AutomaticPublication
    }
}
