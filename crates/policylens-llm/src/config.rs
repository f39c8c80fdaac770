//! Provider selection and connection settings

use crate::chat::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
use crate::{HuggingFaceProvider, LlmError, OpenAiProvider, Provider};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Hosted backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions
    OpenAi,
    /// Hugging Face inference
    HuggingFace,
}

impl ProviderKind {
    /// Get the identifier as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::HuggingFace => "huggingface",
        }
    }

    /// Parse an identifier (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "huggingface" | "hf" => Some(ProviderKind::HuggingFace),
            _ => None,
        }
    }

    /// Environment variable conventionally holding this backend's credential
    pub fn default_credential_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::HuggingFace => "HF_API_TOKEN",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown provider: {}", s))
    }
}

/// Everything needed to construct a hosted provider
///
/// Built once by the bootstrap layer; nothing below it reads the
/// environment.
#[derive(Debug)]
pub struct ProviderConfig {
    /// Which backend
    pub provider: ProviderKind,

    /// Model identifier understood by that backend
    pub model: String,

    /// API key or access token
    pub credential: SecretString,

    /// Override of the backend's default base URL
    pub base_url: Option<String>,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// Attempts per generate call (at least 1)
    pub max_retries: u32,
}

impl ProviderConfig {
    /// Create a configuration with default timeout and retries
    pub fn new(provider: ProviderKind, model: impl Into<String>, credential: SecretString) -> Self {
        Self {
            provider,
            model: model.into(),
            credential,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model.trim().is_empty() {
            return Err(LlmError::NotConfigured("model must not be empty".to_string()));
        }
        if self.credential.expose_secret().trim().is_empty() {
            return Err(LlmError::NotConfigured(format!(
                "{} credential must not be empty",
                self.provider
            )));
        }
        if self.timeout_secs == 0 {
            return Err(LlmError::NotConfigured(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(LlmError::NotConfigured(
                "max_retries must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Construct the selected provider
    pub fn build(self) -> Result<Provider, LlmError> {
        self.validate()?;
        let timeout = self.timeout();

        let provider = match self.provider {
            ProviderKind::OpenAi => {
                let mut p = OpenAiProvider::new(self.credential, self.model)?
                    .with_max_retries(self.max_retries)
                    .with_timeout(timeout)?;
                if let Some(url) = self.base_url {
                    p = p.with_base_url(url);
                }
                Provider::OpenAi(p)
            }
            ProviderKind::HuggingFace => {
                let mut p = HuggingFaceProvider::new(self.credential, self.model)?
                    .with_max_retries(self.max_retries)
                    .with_timeout(timeout)?;
                if let Some(url) = self.base_url {
                    p = p.with_base_url(url);
                }
                Provider::HuggingFace(p)
            }
        };

        Ok(provider)
    }
}
