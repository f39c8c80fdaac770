//! PolicyLens Classifier
//!
//! Classifies access-control policies as `Weak` or `Strong` with an LLM and
//! returns only schema-conformant results.
//!
//! # Architecture
//!
//! ```text
//! Policy → PromptBuilder → TextGenerator → extract_candidate → validate_candidate → ClassificationResult
//! ```
//!
//! The model is untrusted. Every reply goes through extraction and schema
//! validation; anything that does not fit fails with a typed
//! [`ClassificationError`] carrying the raw model text.
//!
//! # Example Usage
//!
//! ```
//! use policylens_classifier::PolicyClassifier;
//! use policylens_domain::Classification;
//! use policylens_llm::MockProvider;
//! use serde_json::json;
//!
//! let llm = MockProvider::new(
//!     r#"{"classification": "Weak", "reason": "Allows all S3 actions on all resources."}"#,
//! );
//! let classifier = PolicyClassifier::default_config(llm);
//!
//! let policy = json!({"Statement": [{"Effect": "Allow", "Action": "s3:*", "Resource": "*"}]});
//! let result = classifier.classify(&policy).unwrap();
//!
//! assert_eq!(result.classification(), Classification::Weak);
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod extraction;
mod prompt;
mod types;
mod validator;


pub use classifier::PolicyClassifier;
pub use config::{ClassifierConfig, DEFAULT_MAX_TOKENS, TEMPERATURE};
pub use error::{ClassificationError, ExtractionError, ValidationError};
pub use extraction::extract_candidate;
pub use prompt::{build_prompt, PromptBuilder};
pub use types::{Candidate, Policy, Stage};
pub use validator::{validate_candidate, CLASSIFICATION_FIELD, REASON_FIELD};
