//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider setup error
    #[error("Provider error: {0}")]
    Llm(#[from] policylens_llm::LlmError),

    /// Credential variable unset or empty
    #[error("Missing API key: {0}")]
    MissingCredential(String),

    /// Classification did not produce a result
    #[error("Classification failed ({kind}): {message}")]
    Classification {
        /// Failure class: provider, extraction or validation
        kind: &'static str,
        /// Failure detail
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
