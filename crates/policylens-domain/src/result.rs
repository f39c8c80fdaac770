//! Classification result and the invariants on its reason text

use crate::Classification;
use std::fmt;

/// Minimum reason length in characters, after trimming
pub const REASON_MIN_CHARS: usize = 5;

/// Maximum reason length in characters, after trimming
pub const REASON_MAX_CHARS: usize = 1000;

/// Maximum number of whitespace-separated words in a reason
pub const REASON_MAX_WORDS: usize = 120;

/// Why a reason text was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonViolation {
    /// Fewer than [`REASON_MIN_CHARS`] characters after trimming
    TooShort,

    /// More than [`REASON_MAX_CHARS`] characters after trimming
    TooLong,

    /// More than [`REASON_MAX_WORDS`] words; carries the word count
    TooVerbose(usize),
}

impl fmt::Display for ReasonViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonViolation::TooShort => {
                write!(f, "reason shorter than {} characters", REASON_MIN_CHARS)
            }
            ReasonViolation::TooLong => {
                write!(f, "reason longer than {} characters", REASON_MAX_CHARS)
            }
            ReasonViolation::TooVerbose(words) => write!(
                f,
                "reason has {} words (max: {})",
                words, REASON_MAX_WORDS
            ),
        }
    }
}

/// A validated verdict on a policy
///
/// Fields are private: the only way to obtain a value is [`ClassificationResult::new`],
/// which enforces the reason invariants, so every instance in circulation is
/// schema-conformant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassificationResult {
    classification: Classification,
    reason: String,
}

impl ClassificationResult {
    /// Build a result, trimming the reason and checking length then word count
    pub fn new(
        classification: Classification,
        reason: &str,
    ) -> Result<Self, ReasonViolation> {
        let reason = reason.trim();

        let length = reason.chars().count();
        if length < REASON_MIN_CHARS {
            return Err(ReasonViolation::TooShort);
        }
        if length > REASON_MAX_CHARS {
            return Err(ReasonViolation::TooLong);
        }

        let words = word_count(reason);
        if words > REASON_MAX_WORDS {
            return Err(ReasonViolation::TooVerbose(words));
        }

        Ok(Self {
            classification,
            reason: reason.to_string(),
        })
    }

    /// The verdict
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// The trimmed justification
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Count whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
