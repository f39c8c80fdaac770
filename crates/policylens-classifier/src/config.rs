//! Configuration for the classifier

use serde::{Deserialize, Serialize};

/// Sampling temperature for every generation call
pub const TEMPERATURE: f32 = 0.0;

/// Default bound on generated tokens
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Configuration for the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Maximum tokens the model may generate per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl ClassifierConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Sampling temperature (always zero)
    pub fn temperature(&self) -> f32 {
        TEMPERATURE
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClassifierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_tokens, 300);
        assert_eq!(config.temperature(), 0.0);
    }

    #[test]
    fn test_invalid_max_tokens() {
        let config = ClassifierConfig { max_tokens: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClassifierConfig { max_tokens: 512 };
        let toml_str = config.to_toml().unwrap();
        let parsed = ClassifierConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_toml_missing_fields_use_defaults() {
        let parsed = ClassifierConfig::from_toml("").unwrap();
        assert_eq!(parsed, ClassifierConfig::default());
    }
}
