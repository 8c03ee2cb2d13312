//! Validation of the `POST /api/recommendations` body.

use serde_json::Value;

use super::types::SoilAssessment;

/// Reasons a request body is rejected. Always surfaced as a 400.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No data provided")]
    NoData,

    #[error("Missing required fields: soil_type and soil_loss")]
    MissingFields,

    #[error("Invalid soil_type: expected a string")]
    InvalidSoilType,

    #[error("Invalid soil_loss: expected a number, got {0}")]
    InvalidSoilLoss(String),
}

/// Turn a JSON request body into a [`SoilAssessment`].
///
/// `soil_type` must be a non-empty string. `soil_loss` may be a JSON number
/// or a numeric string, and must be finite.
pub fn validate_request(body: &Value) -> Result<SoilAssessment, ValidationError> {
    let fields = match body.as_object() {
        Some(fields) if !fields.is_empty() => fields,
        _ => return Err(ValidationError::NoData),
    };

    let soil_type = match fields.get("soil_type") {
        None | Some(Value::Null) => return Err(ValidationError::MissingFields),
        Some(Value::String(s)) if s.is_empty() => return Err(ValidationError::MissingFields),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ValidationError::InvalidSoilType),
    };

    let soil_loss = match fields.get("soil_loss") {
        None | Some(Value::Null) => return Err(ValidationError::MissingFields),
        Some(value) => parse_soil_loss(value)?,
    };

    Ok(SoilAssessment {
        soil_type,
        soil_loss,
    })
}

fn parse_soil_loss(value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::InvalidSoilLoss(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let assessment =
            validate_request(&json!({"soil_type": "Loamy Soil", "soil_loss": 7.82})).unwrap();
        assert_eq!(assessment.soil_type, "Loamy Soil");
        assert_eq!(assessment.soil_loss, 7.82);
    }

    #[test]
    fn test_integer_and_zero_soil_loss_accepted() {
        let assessment = validate_request(&json!({"soil_type": "Sandy Soil", "soil_loss": 0}))
            .unwrap();
        assert_eq!(assessment.soil_loss, 0.0);

        let assessment = validate_request(&json!({"soil_type": "Sandy Soil", "soil_loss": 12}))
            .unwrap();
        assert_eq!(assessment.soil_loss, 12.0);
    }

    #[test]
    fn test_numeric_string_soil_loss_accepted() {
        let assessment =
            validate_request(&json!({"soil_type": "Clay Soil", "soil_loss": " 3.5 "})).unwrap();
        assert_eq!(assessment.soil_loss, 3.5);
    }

    #[test]
    fn test_empty_or_non_object_body() {
        assert_eq!(validate_request(&json!({})), Err(ValidationError::NoData));
        assert_eq!(validate_request(&Value::Null), Err(ValidationError::NoData));
        assert_eq!(validate_request(&json!([1, 2])), Err(ValidationError::NoData));
        assert_eq!(validate_request(&json!("text")), Err(ValidationError::NoData));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_request(&json!({"soil_loss": 1.0})),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_request(&json!({"soil_type": "Loamy Soil"})),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_request(&json!({"soil_type": "", "soil_loss": 1.0})),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_request(&json!({"soil_type": "Loamy Soil", "soil_loss": null})),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_whitespace_soil_type_is_not_missing() {
        let assessment =
            validate_request(&json!({"soil_type": "   ", "soil_loss": 1.0})).unwrap();
        assert_eq!(assessment.soil_type, "   ");
    }

    #[test]
    fn test_missing_fields_message() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "Missing required fields: soil_type and soil_loss"
        );
    }

    #[test]
    fn test_invalid_types() {
        assert_eq!(
            validate_request(&json!({"soil_type": 42, "soil_loss": 1.0})),
            Err(ValidationError::InvalidSoilType)
        );
        assert_eq!(
            validate_request(&json!({"soil_type": "Loamy Soil", "soil_loss": "a lot"})),
            Err(ValidationError::InvalidSoilLoss("\"a lot\"".to_string()))
        );
        assert_eq!(
            validate_request(&json!({"soil_type": "Loamy Soil", "soil_loss": true})),
            Err(ValidationError::InvalidSoilLoss("true".to_string()))
        );
    }

    #[test]
    fn test_non_finite_soil_loss_rejected() {
        assert!(matches!(
            validate_request(&json!({"soil_type": "Loamy Soil", "soil_loss": "NaN"})),
            Err(ValidationError::InvalidSoilLoss(_))
        ));
        assert!(matches!(
            validate_request(&json!({"soil_type": "Loamy Soil", "soil_loss": "inf"})),
            Err(ValidationError::InvalidSoilLoss(_))
        ));
    }
}
