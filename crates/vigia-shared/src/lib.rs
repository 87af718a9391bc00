//! Shared types and policy for the Vigia decision gateway.
//!
//! Everything here is pure: no I/O, no clocks, no randomness. The daemon
//! (`vigiad`) owns the network edges and feeds these types.

pub mod contract;
pub mod decision;
pub mod error;
pub mod policy;
pub mod request;

pub use contract::ClassifierResponse;
pub use decision::{Decision, EvaluatedDecision, FallbackDecision, FALLBACK_MESSAGE};
pub use error::{ContractError, FailureKind, ValidationError};
pub use policy::{suggest_action, SuggestedAction, REVIEW_CONFIDENCE_THRESHOLD};
pub use request::AnalysisRequest;
