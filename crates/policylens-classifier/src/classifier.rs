//! Core classification pipeline

use crate::config::ClassifierConfig;
use crate::error::ClassificationError;
use crate::extraction::extract_candidate;
use crate::prompt::PromptBuilder;
use crate::types::{Policy, Stage};
use crate::validator::validate_candidate;
use policylens_domain::{ClassificationResult, TextGenerator};
use std::fmt;
use tracing::{debug, info, warn};

/// The classifier turns a policy into a validated Weak/Strong verdict
///
/// Holds only the injected generator and an immutable config, so it is
/// `Send + Sync` whenever the generator is. Every `classify` call makes
/// exactly one generation call and never retries.
pub struct PolicyClassifier<G>
where
    G: TextGenerator,
{
    generator: G,
    config: ClassifierConfig,
}

impl<G> PolicyClassifier<G>
where
    G: TextGenerator,
    G::Error: fmt::Display,
{
    /// Create a new classifier, rejecting an invalid configuration
    pub fn new(generator: G, config: ClassifierConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { generator, config })
    }

    /// Create a classifier with the default configuration
    pub fn default_config(generator: G) -> Self {
        Self {
            generator,
            config: ClassifierConfig::default(),
        }
    }

    /// The injected generator
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one policy
    pub fn classify(
        &self,
        policy: &Policy,
    ) -> Result<ClassificationResult, ClassificationError<G::Error>> {
        debug!(stage = %Stage::Idle, "Classifying policy");

        let prompt = PromptBuilder::new(policy).build();
        debug!(stage = %Stage::PromptBuilt, "Prompt length: {} chars", prompt.len());

        let raw = match self.generator.generate(
            &prompt,
            self.config.max_tokens,
            self.config.temperature(),
        ) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(stage = %Stage::ModelInvoked, "Generation failed: {}", e);
                return Err(ClassificationError::Provider(e));
            }
        };
        debug!(stage = %Stage::ModelInvoked, "Model response length: {} chars", raw.len());

        let candidate = match extract_candidate(&raw) {
            Ok(candidate) => candidate,
            Err(source) => {
                warn!(stage = %Stage::Extracted, "Extraction failed: {}", source);
                return Err(ClassificationError::Extraction { source, raw });
            }
        };
        debug!(stage = %Stage::Extracted, "Extracted candidate with {} keys", candidate.len());

        let result = match validate_candidate(&candidate) {
            Ok(result) => result,
            Err(source) => {
                warn!(stage = %Stage::Validated, "Validation failed: {}", source);
                return Err(ClassificationError::Validation { source, raw });
            }
        };

        info!(
            stage = %Stage::Validated,
            "Policy classified as {} ({} words of reasoning)",
            result.classification(),
            policylens_domain::word_count(result.reason())
        );

        Ok(result)
    }
}
