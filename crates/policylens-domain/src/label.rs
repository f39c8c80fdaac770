//! Classification label - the two-valued verdict on a policy

use std::fmt;

/// Verdict on an access-control policy
///
/// The label set is closed. Parsing is exact and case-sensitive: `"weak"`,
/// `" Weak"` or `"WEAK"` are not labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Over-permissive policy (wildcards, unscoped resources)
    Weak,

    /// Least-privilege policy
    Strong,
}

impl Classification {
    /// All labels, in prompt order
    pub const ALL: [Classification; 2] = [Classification::Weak, Classification::Strong];

    /// Get the label as its literal wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Weak => "Weak",
            Classification::Strong => "Strong",
        }
    }

    /// Parse a label from its literal wire string (no normalization)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Weak" => Some(Classification::Weak),
            "Strong" => Some(Classification::Strong),
            _ => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid classification: {}", s))
    }
}
