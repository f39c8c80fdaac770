//! Error types for the classification pipeline

use crate::types::Stage;
use policylens_domain::{ReasonViolation, REASON_MAX_CHARS, REASON_MAX_WORDS, REASON_MIN_CHARS};
use thiserror::Error;

/// Failure to recover a JSON object from raw model text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No `{ ... }` span in the output
    #[error("No JSON object found in model output")]
    NoJsonObjectFound,

    /// The `{ ... }` span is not valid JSON
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// More than one top-level object in the `{ ... }` span
    #[error("Ambiguous model output: more than one top-level JSON object")]
    AmbiguousJsonObject,
}

/// Schema violation in an extracted candidate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required key absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// `classification` is not exactly "Weak" or "Strong"
    #[error("Invalid classification label: {0} (expected \"Weak\" or \"Strong\")")]
    InvalidLabel(String),

    /// Field present with the wrong JSON type
    #[error("Field '{field}' must be a {expected}")]
    InvalidFieldType {
        /// Offending field
        field: String,
        /// Expected JSON type
        expected: &'static str,
    },

    /// Trimmed reason below the minimum length
    #[error("Reason too short: at least {min} characters required", min = REASON_MIN_CHARS)]
    ReasonTooShort,

    /// Trimmed reason above the maximum length
    #[error("Reason too long: at most {max} characters allowed", max = REASON_MAX_CHARS)]
    ReasonTooLong,

    /// Reason has too many words; carries the word count
    #[error("Reason too verbose: {0} words (max: {max})", max = REASON_MAX_WORDS)]
    ReasonTooVerbose(usize),

    /// Key outside the schema
    #[error("Unexpected field: {0}")]
    UnexpectedField(String),
}

impl From<ReasonViolation> for ValidationError {
    fn from(violation: ReasonViolation) -> Self {
        match violation {
            ReasonViolation::TooShort => ValidationError::ReasonTooShort,
            ReasonViolation::TooLong => ValidationError::ReasonTooLong,
            ReasonViolation::TooVerbose(words) => ValidationError::ReasonTooVerbose(words),
        }
    }
}

/// Errors that can occur during `classify`
///
/// `E` is the generation capability's own error type, passed through
/// untouched. Extraction and validation failures keep the raw model text.
#[derive(Error, Debug)]
pub enum ClassificationError<E> {
    /// The generation call failed
    #[error("Provider error: {0}")]
    Provider(E),

    /// No usable JSON object in the model output
    #[error("Failed to extract JSON from model output: {source}")]
    Extraction {
        /// What went wrong
        source: ExtractionError,
        /// Model output as received
        raw: String,
    },

    /// JSON object does not match the result schema
    #[error("Model output failed schema validation: {source}")]
    Validation {
        /// First rule violated
        source: ValidationError,
        /// Model output as received
        raw: String,
    },
}

impl<E> ClassificationError<E> {
    /// Stable short name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            ClassificationError::Provider(_) => "provider",
            ClassificationError::Extraction { .. } => "extraction",
            ClassificationError::Validation { .. } => "validation",
        }
    }

    /// Pipeline stage that was being entered when the failure happened
    pub fn stage(&self) -> Stage {
        match self {
            ClassificationError::Provider(_) => Stage::ModelInvoked,
            ClassificationError::Extraction { .. } => Stage::Extracted,
            ClassificationError::Validation { .. } => Stage::Validated,
        }
    }

    /// Raw model text, when the model answered
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            ClassificationError::Provider(_) => None,
            ClassificationError::Extraction { raw, .. }
            | ClassificationError::Validation { raw, .. } => Some(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_violation_mapping() {
        assert_eq!(
            ValidationError::from(ReasonViolation::TooShort),
            ValidationError::ReasonTooShort
        );
        assert_eq!(
            ValidationError::from(ReasonViolation::TooLong),
            ValidationError::ReasonTooLong
        );
        assert_eq!(
            ValidationError::from(ReasonViolation::TooVerbose(130)),
            ValidationError::ReasonTooVerbose(130)
        );
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = ValidationError::InvalidLabel("Medium".to_string());
        assert!(err.to_string().contains("Medium"));

        let err = ValidationError::UnexpectedField("extra".to_string());
        assert_eq!(err.to_string(), "Unexpected field: extra");

        let err = ValidationError::ReasonTooVerbose(150);
        assert!(err.to_string().contains("150"));
    }

    #[test]
    fn test_classification_error_accessors() {
        let err: ClassificationError<String> = ClassificationError::Extraction {
            source: ExtractionError::NoJsonObjectFound,
            raw: "I cannot comply".to_string(),
        };
        assert_eq!(err.kind(), "extraction");
        assert_eq!(err.stage(), Stage::Extracted);
        assert_eq!(err.raw_output(), Some("I cannot comply"));

        let err: ClassificationError<String> = ClassificationError::Provider("timeout".to_string());
        assert_eq!(err.kind(), "provider");
        assert_eq!(err.stage(), Stage::ModelInvoked);
        assert_eq!(err.raw_output(), None);
        assert_eq!(err.to_string(), "Provider error: timeout");
    }
}
