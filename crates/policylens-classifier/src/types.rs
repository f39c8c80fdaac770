//! Pipeline-local types

use serde_json::{Map, Value};
use std::fmt;

/// An access-control policy document, passed through opaquely
pub type Policy = Value;

/// JSON object recovered from model output, before schema validation
pub type Candidate = Map<String, Value>;

/// Stages of a single `classify` call
///
/// The pipeline is linear: each call walks
/// `Idle → PromptBuilt → ModelInvoked → Extracted → Validated` or stops at
/// the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing done yet
    Idle,
    /// Prompt text rendered
    PromptBuilt,
    /// Generation capability answered
    ModelInvoked,
    /// Candidate object recovered
    Extracted,
    /// Result constructed
    Validated,
}

impl Stage {
    /// Get the stage name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::PromptBuilt => "prompt_built",
            Stage::ModelInvoked => "model_invoked",
            Stage::Extracted => "extracted",
            Stage::Validated => "validated",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
