//! Inbound analysis request.
//!
//! Validation happens here, before anything is sent upstream.

use crate::error::ValidationError;
use serde_json::Value;

/// Name of the text field on the wire
pub const TEXT_FIELD: &str = "text";

/// Key used by the first deployment of the gateway, still accepted
const TEXT_FIELD_ALIAS: &str = "texto";

/// Text submitted for analysis. Never empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    text: String,
}

impl AnalysisRequest {
    /// Build a request from raw text, trimming surrounding whitespace.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty(TEXT_FIELD));
        }
        let text = if trimmed.len() == text.len() {
            text
        } else {
            trimmed.to_string()
        };
        Ok(Self { text })
    }

    /// Build a request from an inbound JSON body.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let map = body.as_object().ok_or(ValidationError::NotAnObject)?;

        let value = map
            .get(TEXT_FIELD)
            .filter(|v| !v.is_null())
            .or_else(|| map.get(TEXT_FIELD_ALIAS).filter(|v| !v.is_null()))
            .ok_or(ValidationError::Missing(TEXT_FIELD))?;

        match value {
            Value::String(text) => Self::new(text.as_str()),
            _ => Err(ValidationError::NotAString(TEXT_FIELD)),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(AnalysisRequest::new(""), Err(ValidationError::Empty("text")));
    }

    #[test]
    fn test_new_rejects_whitespace_only() {
        assert_eq!(
            AnalysisRequest::new("  \n\t "),
            Err(ValidationError::Empty("text"))
        );
    }

    #[test]
    fn test_new_trims() {
        let req = AnalysisRequest::new("  Hello  ").unwrap();
        assert_eq!(req.text(), "Hello");
    }

    #[test]
    fn test_from_json_ok() {
        let req = AnalysisRequest::from_json(&json!({"text": "Hello"})).unwrap();
        assert_eq!(req.text(), "Hello");
    }

    #[test]
    fn test_from_json_alias() {
        let req = AnalysisRequest::from_json(&json!({"texto": "Olá"})).unwrap();
        assert_eq!(req.text(), "Olá");
    }

    #[test]
    fn test_from_json_null_text_falls_through_to_alias() {
        let req = AnalysisRequest::from_json(&json!({"text": null, "texto": "Olá"})).unwrap();
        assert_eq!(req.text(), "Olá");
    }

    #[test]
    fn test_from_json_missing() {
        assert_eq!(
            AnalysisRequest::from_json(&json!({})),
            Err(ValidationError::Missing("text"))
        );
        assert_eq!(
            AnalysisRequest::from_json(&json!({"text": null})),
            Err(ValidationError::Missing("text"))
        );
    }

    #[test]
    fn test_from_json_wrong_type() {
        assert_eq!(
            AnalysisRequest::from_json(&json!({"text": 42})),
            Err(ValidationError::NotAString("text"))
        );
    }

    #[test]
    fn test_from_json_not_object() {
        assert_eq!(
            AnalysisRequest::from_json(&json!(["Hello"])),
            Err(ValidationError::NotAnObject)
        );
    }
}
