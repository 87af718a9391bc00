//! Error types for the decision gateway.

use std::fmt;
use thiserror::Error;

/// Input rejected before any classifier call is made.
///
/// This is the only failure that reaches the caller as an error; every
/// other failure ends in a fallback decision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The request body must be a JSON object.")]
    NotAnObject,

    #[error("The {0} field is required.")]
    Missing(&'static str),

    #[error("The {0} field must be a string.")]
    NotAString(&'static str),

    #[error("The {0} field must not be empty.")]
    Empty(&'static str),

    #[error("The request body could not be read: {0}")]
    Unreadable(String),
}

impl ValidationError {
    /// Field the error is attached to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Missing(field)
            | ValidationError::NotAString(field)
            | ValidationError::Empty(field) => Some(*field),
            ValidationError::NotAnObject | ValidationError::Unreadable(_) => None,
        }
    }
}

/// Classifier answered, but the body does not honour the contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("classifier response is not a JSON object")]
    NotAnObject,

    #[error("classifier response is missing mandatory field '{0}'")]
    MissingMandatoryField(&'static str),

    #[error("classifier field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ContractError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ContractError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure taxonomy for everything absorbed into the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network failure, timeout, or non-success status from the classifier
    UpstreamUnavailable,
    /// Classifier answered but omitted or mangled a field the policy needs
    ContractViolation,
    /// Anything else: unparseable body, internal fault
    UnexpectedFault,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UpstreamUnavailable => "upstream_unavailable",
            FailureKind::ContractViolation => "contract_violation",
            FailureKind::UnexpectedFault => "unexpected_fault",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_field() {
        assert_eq!(ValidationError::Missing("text").field(), Some("text"));
        assert_eq!(ValidationError::Empty("text").field(), Some("text"));
        assert_eq!(ValidationError::NotAnObject.field(), None);
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::Missing("text").to_string(),
            "The text field is required."
        );
        assert_eq!(
            ValidationError::NotAString("text").to_string(),
            "The text field must be a string."
        );
    }

    #[test]
    fn test_failure_kind_labels() {
        assert_eq!(FailureKind::UpstreamUnavailable.to_string(), "upstream_unavailable");
        assert_eq!(FailureKind::ContractViolation.to_string(), "contract_violation");
        assert_eq!(FailureKind::UnexpectedFault.to_string(), "unexpected_fault");
    }
}
