//! Schema validation for extracted candidates

use crate::error::ValidationError;
use crate::types::Candidate;
use policylens_domain::{Classification, ClassificationResult};
use serde_json::Value;

/// Key holding the label
pub const CLASSIFICATION_FIELD: &str = "classification";

/// Key holding the justification
pub const REASON_FIELD: &str = "reason";

/// Validate a candidate and build the typed result
///
/// Checks run in a fixed order and stop at the first violation, so a
/// candidate with several problems always reports the same one.
pub fn validate_candidate(candidate: &Candidate) -> Result<ClassificationResult, ValidationError> {
    let classification = validate_label(candidate)?;

    let reason = match candidate.get(REASON_FIELD) {
        None => return Err(ValidationError::MissingField(REASON_FIELD.to_string())),
        Some(Value::String(reason)) => reason,
        Some(_) => {
            return Err(ValidationError::InvalidFieldType {
                field: REASON_FIELD.to_string(),
                expected: "string",
            })
        }
    };

    let result = ClassificationResult::new(classification, reason)?;

    if let Some(extra) = candidate
        .keys()
        .find(|key| *key != CLASSIFICATION_FIELD && *key != REASON_FIELD)
    {
        return Err(ValidationError::UnexpectedField(extra.clone()));
    }

    Ok(result)
}

fn validate_label(candidate: &Candidate) -> Result<Classification, ValidationError> {
    match candidate.get(CLASSIFICATION_FIELD) {
        None => Err(ValidationError::MissingField(CLASSIFICATION_FIELD.to_string())),
        Some(Value::String(label)) => {
            Classification::parse(label).ok_or_else(|| ValidationError::InvalidLabel(label.clone()))
        }
        Some(other) => Err(ValidationError::InvalidLabel(other.to_string())),
    }
}
