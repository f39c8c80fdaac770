//! Recover a JSON object from raw model output
//!
//! The heuristic takes everything from the first `{` to the last `}` and
//! parses it. It tolerates prose and markdown fences around the object.
//!
//! Known limitation: it assumes exactly one outermost object. A reply with
//! several top-level objects fails with `AmbiguousJsonObject`; stray braces
//! in the surrounding prose break the span and fail with `MalformedJson`.

use crate::error::ExtractionError;
use crate::types::Candidate;
use serde_json::{Deserializer, Map, Value};

/// Extract one candidate object from model output
pub fn extract_candidate(raw: &str) -> Result<Candidate, ExtractionError> {
    let text = raw.trim();

    let span = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => return Err(ExtractionError::NoJsonObjectFound),
    };

    parse_single_object(span)
}

/// Parse a `{ ... }` span that must hold exactly one object
fn parse_single_object(span: &str) -> Result<Candidate, ExtractionError> {
    let mut stream = Deserializer::from_str(span).into_iter::<Map<String, Value>>();

    let object = match stream.next() {
        Some(Ok(object)) => object,
        Some(Err(e)) => return Err(ExtractionError::MalformedJson(e.to_string())),
        None => return Err(ExtractionError::MalformedJson("empty input".to_string())),
    };

    let rest = span[stream.byte_offset()..].trim();
    if rest.is_empty() {
        return Ok(object);
    }

    if rest.contains('{') {
        Err(ExtractionError::AmbiguousJsonObject)
    } else {
        Err(ExtractionError::MalformedJson(format!(
            "trailing characters after object: {}",
            rest
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_plain_object() {
        let candidate =
            extract_candidate(r#"{"classification": "Strong", "reason": "Scoped to one bucket."}"#)
                .unwrap();
        assert_eq!(candidate["classification"], "Strong");
        assert_eq!(candidate["reason"], "Scoped to one bucket.");
    }

    #[test]
    fn test_extract_with_surrounding_prose() {
        let candidate =
            extract_candidate(r#"Sure! {"classification":"Weak","reason":"x"} thanks"#).unwrap();
        assert_eq!(candidate.len(), 2);
        assert_eq!(candidate["classification"], json!("Weak"));
        assert_eq!(candidate["reason"], json!("x"));
    }

    #[test]
    fn test_extract_from_markdown_fence() {
        let response = r#"```json
{"classification": "Weak", "reason": "Wildcard resource."}
```"#;
        let candidate = extract_candidate(response).unwrap();
        assert_eq!(candidate["classification"], "Weak");
    }

    #[test]
    fn test_extract_nested_object() {
        let candidate =
            extract_candidate(r#"Answer: {"classification": "Weak", "meta": {"k": 1}} done"#)
                .unwrap();
        assert_eq!(candidate["meta"]["k"], 1);
    }

    #[test]
    fn test_no_braces() {
        assert_eq!(
            extract_candidate("I cannot comply"),
            Err(ExtractionError::NoJsonObjectFound)
        );
        assert_eq!(extract_candidate(""), Err(ExtractionError::NoJsonObjectFound));
        assert_eq!(extract_candidate("   \n\t "), Err(ExtractionError::NoJsonObjectFound));
    }

    #[test]
    fn test_only_one_kind_of_brace() {
        assert_eq!(
            extract_candidate(r#"{"classification": "Weak""#),
            Err(ExtractionError::NoJsonObjectFound)
        );
        assert_eq!(
            extract_candidate("nothing to see }"),
            Err(ExtractionError::NoJsonObjectFound)
        );
    }

    #[test]
    fn test_closing_brace_before_opening() {
        assert_eq!(
            extract_candidate("} backwards {"),
            Err(ExtractionError::NoJsonObjectFound)
        );
    }

    #[test]
    fn test_malformed_json() {
        let result = extract_candidate(r#"{"classification": "Weak", "reason": }"#);
        assert!(matches!(result, Err(ExtractionError::MalformedJson(_))));
    }

    #[test]
    fn test_empty_object_is_extracted() {
        let candidate = extract_candidate("{}").unwrap();
        assert!(candidate.is_empty());
    }

    #[test]
    fn test_multiple_objects_are_ambiguous() {
        let response = r#"{"classification": "Weak", "reason": "first"} or maybe {"classification": "Strong", "reason": "second"}"#;
        assert_eq!(
            extract_candidate(response),
            Err(ExtractionError::AmbiguousJsonObject)
        );

        assert_eq!(
            extract_candidate(r#"{"a": 1}{"b": 2}"#),
            Err(ExtractionError::AmbiguousJsonObject)
        );
    }

    #[test]
    fn test_stray_closing_brace_in_prose() {
        let response = r#"{"classification": "Weak", "reason": "Wildcards."} (see note}"#;
        assert!(matches!(
            extract_candidate(response),
            Err(ExtractionError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_malformed_detail_is_reported() {
        match extract_candidate("{not json}") {
            Err(ExtractionError::MalformedJson(detail)) => assert!(!detail.is_empty()),
            other => panic!("Expected MalformedJson, got {:?}", other),
        }
    }
}
