//! Classifier response contract.
//!
//! The classifier is untrusted. The mandatory field is checked first, and
//! optional fields are only defaulted after that check has passed.

use crate::error::ContractError;
use serde::Serialize;
use serde_json::{Map, Value};

/// A field on the classifier contract, with the key the first classifier
/// deployment used for it.
struct Field {
    name: &'static str,
    alias: &'static str,
}

const CONTAINS_PERSONAL_DATA: Field = Field {
    name: "contains_personal_data",
    alias: "contem_dados_pessoais",
};
const CONTAINS_SENSITIVE_DATA: Field = Field {
    name: "contains_sensitive_data",
    alias: "contem_dados_sensiveis",
};
const TRACE_ID: Field = Field {
    name: "trace_id",
    alias: "trace_id",
};
const DECISION_ORIGIN: Field = Field {
    name: "decision_origin",
    alias: "origem_decisao",
};
const DETECTED_TYPES: Field = Field {
    name: "detected_types",
    alias: "tipos_detectados",
};
const SENSITIVE_CATEGORIES: Field = Field {
    name: "sensitive_categories",
    alias: "categorias_sensiveis",
};
const CONFIDENCE: Field = Field {
    name: "confidence",
    alias: "confianca",
};

const DEFAULT_CONTAINS_SENSITIVE_DATA: bool = false;
const DEFAULT_CONFIDENCE: f64 = 0.0;

/// Validated classifier output with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifierResponse {
    pub contains_personal_data: bool,
    pub contains_sensitive_data: bool,
    pub trace_id: Option<String>,
    pub decision_origin: Vec<String>,
    pub detected_types: Vec<String>,
    pub sensitive_categories: Vec<String>,
    pub confidence: f64,
}

impl ClassifierResponse {
    /// Validate a raw classifier body against the contract.
    pub fn from_value(body: Value) -> Result<Self, ContractError> {
        let map = match body {
            Value::Object(map) => map,
            _ => return Err(ContractError::NotAnObject),
        };

        let contains_personal_data = match lookup(&map, &CONTAINS_PERSONAL_DATA) {
            None => {
                return Err(ContractError::MissingMandatoryField(
                    CONTAINS_PERSONAL_DATA.name,
                ))
            }
            Some(value) => as_bool(value, &CONTAINS_PERSONAL_DATA)?,
        };

        let contains_sensitive_data = lookup(&map, &CONTAINS_SENSITIVE_DATA)
            .map(|v| as_bool(v, &CONTAINS_SENSITIVE_DATA))
            .transpose()?
            .unwrap_or(DEFAULT_CONTAINS_SENSITIVE_DATA);

        let trace_id = lookup(&map, &TRACE_ID)
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                other => Err(ContractError::invalid(
                    TRACE_ID.name,
                    format!("expected string, got {}", type_name(other)),
                )),
            })
            .transpose()?;

        let confidence = lookup(&map, &CONFIDENCE)
            .map(as_confidence)
            .transpose()?
            .unwrap_or(DEFAULT_CONFIDENCE);

        Ok(Self {
            contains_personal_data,
            contains_sensitive_data,
            trace_id,
            decision_origin: string_list(&map, &DECISION_ORIGIN)?,
            detected_types: string_list(&map, &DETECTED_TYPES)?,
            sensitive_categories: string_list(&map, &SENSITIVE_CATEGORIES)?,
            confidence,
        })
    }
}

/// Present and non-null value for a field, canonical key first.
fn lookup<'a>(map: &'a Map<String, Value>, field: &Field) -> Option<&'a Value> {
    map.get(field.name)
        .filter(|v| !v.is_null())
        .or_else(|| map.get(field.alias).filter(|v| !v.is_null()))
}

fn as_bool(value: &Value, field: &Field) -> Result<bool, ContractError> {
    value.as_bool().ok_or_else(|| {
        ContractError::invalid(
            field.name,
            format!("expected boolean, got {}", type_name(value)),
        )
    })
}

fn as_confidence(value: &Value) -> Result<f64, ContractError> {
    let confidence = value.as_f64().ok_or_else(|| {
        ContractError::invalid(
            CONFIDENCE.name,
            format!("expected number, got {}", type_name(value)),
        )
    })?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(ContractError::invalid(
            CONFIDENCE.name,
            format!("{} is outside [0, 1]", confidence),
        ));
    }
    Ok(confidence)
}

fn string_list(map: &Map<String, Value>, field: &Field) -> Result<Vec<String>, ContractError> {
    let Some(value) = lookup(map, field) else {
        return Ok(Vec::new());
    };
    let items = value.as_array().ok_or_else(|| {
        ContractError::invalid(
            field.name,
            format!("expected array, got {}", type_name(value)),
        )
    })?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ContractError::invalid(
                    field.name,
                    format!("expected string items, got {}", type_name(item)),
                )
            })
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_response() {
        let resp = ClassifierResponse::from_value(json!({
            "contains_personal_data": true,
            "contains_sensitive_data": true,
            "trace_id": "abc-123",
            "decision_origin": ["regex", "ner"],
            "detected_types": ["cpf"],
            "sensitive_categories": ["health"],
            "confidence": 0.9
        }))
        .unwrap();

        assert!(resp.contains_personal_data);
        assert!(resp.contains_sensitive_data);
        assert_eq!(resp.trace_id.as_deref(), Some("abc-123"));
        assert_eq!(resp.decision_origin, vec!["regex", "ner"]);
        assert_eq!(resp.detected_types, vec!["cpf"]);
        assert_eq!(resp.sensitive_categories, vec!["health"]);
        assert_eq!(resp.confidence, 0.9);
    }

    #[test]
    fn test_defaults_applied() {
        let resp = ClassifierResponse::from_value(json!({"contains_personal_data": false})).unwrap();
        assert!(!resp.contains_sensitive_data);
        assert_eq!(resp.trace_id, None);
        assert!(resp.decision_origin.is_empty());
        assert!(resp.detected_types.is_empty());
        assert!(resp.sensitive_categories.is_empty());
        assert_eq!(resp.confidence, 0.0);
    }

    #[test]
    fn test_null_optionals_take_defaults() {
        let resp = ClassifierResponse::from_value(json!({
            "contains_personal_data": true,
            "contains_sensitive_data": null,
            "trace_id": null,
            "detected_types": null,
            "confidence": null
        }))
        .unwrap();
        assert!(!resp.contains_sensitive_data);
        assert_eq!(resp.trace_id, None);
        assert!(resp.detected_types.is_empty());
        assert_eq!(resp.confidence, 0.0);
    }

    #[test]
    fn test_missing_mandatory_field() {
        let err = ClassifierResponse::from_value(json!({
            "contains_sensitive_data": true,
            "confidence": 0.99
        }))
        .unwrap_err();
        assert_eq!(err, ContractError::MissingMandatoryField("contains_personal_data"));
    }

    #[test]
    fn test_null_mandatory_field_is_missing() {
        let err = ClassifierResponse::from_value(json!({"contains_personal_data": null})).unwrap_err();
        assert_eq!(err, ContractError::MissingMandatoryField("contains_personal_data"));
    }

    #[test]
    fn test_mandatory_field_wrong_type() {
        let err = ClassifierResponse::from_value(json!({"contains_personal_data": "yes"})).unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidField { field: "contains_personal_data", .. }
        ));
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(
            ClassifierResponse::from_value(json!([true])).unwrap_err(),
            ContractError::NotAnObject
        );
    }

    #[test]
    fn test_confidence_out_of_range() {
        let err = ClassifierResponse::from_value(json!({
            "contains_personal_data": true,
            "confidence": 1.5
        }))
        .unwrap_err();
        assert!(matches!(err, ContractError::InvalidField { field: "confidence", .. }));
    }

    #[test]
    fn test_sensitive_flag_wrong_type() {
        let err = ClassifierResponse::from_value(json!({
            "contains_personal_data": true,
            "contains_sensitive_data": "false"
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidField { field: "contains_sensitive_data", .. }
        ));
    }

    #[test]
    fn test_trace_id_wrong_type() {
        let err = ClassifierResponse::from_value(json!({
            "contains_personal_data": false,
            "trace_id": 1234
        }))
        .unwrap_err();
        assert!(matches!(err, ContractError::InvalidField { field: "trace_id", .. }));
    }

    #[test]
    fn test_list_with_non_string_item() {
        let err = ClassifierResponse::from_value(json!({
            "contains_personal_data": true,
            "detected_types": ["cpf", 3]
        }))
        .unwrap_err();
        assert!(matches!(err, ContractError::InvalidField { field: "detected_types", .. }));
    }

    #[test]
    fn test_portuguese_keys() {
        let resp = ClassifierResponse::from_value(json!({
            "contem_dados_pessoais": true,
            "contem_dados_sensiveis": false,
            "origem_decisao": ["regex"],
            "tipos_detectados": ["email"],
            "categorias_sensiveis": [],
            "confianca": 0.7
        }))
        .unwrap();
        assert!(resp.contains_personal_data);
        assert_eq!(resp.decision_origin, vec!["regex"]);
        assert_eq!(resp.detected_types, vec!["email"]);
        assert_eq!(resp.confidence, 0.7);
    }
}
