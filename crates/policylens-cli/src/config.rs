//! Evaluation configuration for the CLI.

use crate::error::{CliError, Result};
use policylens_classifier::ClassifierConfig;
use policylens_llm::ProviderKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Evaluation run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Labeled dataset path
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    /// Report output path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Pipeline settings shared by every model
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Models to evaluate, in report order
    #[serde(default = "default_models")]
    pub models: Vec<ModelConfig>,
}

/// One model under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Backend
    pub provider: ProviderKind,

    /// Model identifier
    pub model: String,

    /// Environment variable holding the credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_env: Option<String>,

    /// Optional base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ModelConfig {
    /// Create a model entry using the provider's default credential variable.
    pub fn new(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            credential_env: None,
            base_url: None,
        }
    }

    /// Credential variable, falling back to the provider default.
    pub fn credential_env(&self) -> &str {
        self.credential_env
            .as_deref()
            .unwrap_or_else(|| self.provider.default_credential_env())
    }
}

impl EvaluationConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: EvaluationConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.classifier.validate().map_err(CliError::Config)?;

        if self.models.is_empty() {
            return Err(CliError::Config("at least one model is required".into()));
        }
        if let Some(model) = self.models.iter().find(|m| m.model.trim().is_empty()) {
            return Err(CliError::Config(format!(
                "model name is empty for provider '{}'",
                model.provider
            )));
        }
        Ok(())
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            output: default_output(),
            classifier: ClassifierConfig::default(),
            models: default_models(),
        }
    }
}

fn default_dataset() -> PathBuf {
    PathBuf::from("policies/labeled_policies.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("outputs/evaluation_results.json")
}

fn default_models() -> Vec<ModelConfig> {
    vec![
        ModelConfig::new(ProviderKind::HuggingFace, "meta-llama/Meta-Llama-3-8B-Instruct"),
        ModelConfig::new(ProviderKind::OpenAi, "gpt-3.5-turbo"),
    ]
}
