//! PolicyLens LLM Provider Layer
//!
//! Generation capability bindings for the classifier core.
//!
//! # Architecture
//!
//! This crate provides implementations of the `TextGenerator` trait from
//! `policylens-domain`. Every backend conforms to the same
//! `generate(prompt, max_tokens, temperature)` signature; which one runs is
//! decided once, at construction, from a [`ProviderConfig`].
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: Hosted chat-style backend
//! - `HuggingFaceProvider`: Hosted inference-style backend
//!
//! # Examples
//!
//! ```
//! use policylens_llm::MockProvider;
//! use policylens_domain::TextGenerator;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt", 300, 0.0).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

mod chat;
pub mod config;
pub mod huggingface;
pub mod openai;

use policylens_domain::TextGenerator;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use config::{ProviderConfig, ProviderKind};
pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credential rejected by the backend
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Request did not complete in time
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider missing a required setting
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Parameters of the most recent call seen by a [`MockProvider`]
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// Prompt text
    pub prompt: String,
    /// Output bound
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use policylens_llm::MockProvider;
/// use policylens_domain::TextGenerator;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt", 300, 0.0).unwrap(), "Fixed response");
///
/// // Multiple responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_response("prompt2", "response2");
/// assert_eq!(provider.generate("prompt1", 300, 0.0).unwrap(), "response1");
/// assert_eq!(provider.generate("prompt2", 300, 0.0).unwrap(), "response2");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<MockRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, message: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Error(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// Parameters of the most recent generate call
    pub fn last_request(&self) -> Option<MockRequest> {
        lock(&self.last_request).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextGenerator for MockProvider {
    type Error = LlmError;

    fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_request) = Some(MockRequest {
            prompt: prompt.to_string(),
            max_tokens,
            temperature,
        });

        match lock(&self.responses).get(prompt) {
            Some(MockReply::Text(response)) => Ok(response.clone()),
            Some(MockReply::Error(message)) => Err(LlmError::Other(message.clone())),
            None => Ok(self.default_response.clone()),
        }
    }
}

// A panicking test thread must not take the mock down with it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The closed set of generation backends
///
/// Chosen once at construction (usually via [`ProviderConfig::build`]);
/// the classifier only ever sees it as a `TextGenerator`.
#[derive(Debug)]
pub enum Provider {
    /// In-memory canned responses
    Mock(MockProvider),
    /// Hosted chat-style backend
    OpenAi(OpenAiProvider),
    /// Hosted inference-style backend
    HuggingFace(HuggingFaceProvider),
}

impl Provider {
    /// Backend identifier, for logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Mock(_) => "mock",
            Provider::OpenAi(_) => ProviderKind::OpenAi.as_str(),
            Provider::HuggingFace(_) => ProviderKind::HuggingFace.as_str(),
        }
    }
}

impl TextGenerator for Provider {
    type Error = LlmError;

    fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, Self::Error> {
        match self {
            Provider::Mock(p) => p.generate(prompt, max_tokens, temperature),
            Provider::OpenAi(p) => p.generate(prompt, max_tokens, temperature),
            Provider::HuggingFace(p) => p.generate(prompt, max_tokens, temperature),
        }
    }
}

impl From<MockProvider> for Provider {
    fn from(provider: MockProvider) -> Self {
        Provider::Mock(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt", 300, 0.0);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("hello", 300, 0.0).unwrap(), "world");
        assert_eq!(provider.generate("foo", 300, 0.0).unwrap(), "bar");
        assert_eq!(
            provider.generate("unknown", 300, 0.0).unwrap(),
            "Default mock response"
        );
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1", 300, 0.0).unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("prompt2", 300, 0.0).unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt", "quota exhausted");

        let result = provider.generate("bad prompt", 300, 0.0);
        match result {
            Err(LlmError::Other(message)) => assert_eq!(message, "quota exhausted"),
            other => panic!("Expected Other error, got {:?}", other),
        }
    }

    #[test]
    fn test_mock_provider_records_last_request() {
        let provider = MockProvider::new("ok");
        assert!(provider.last_request().is_none());

        provider.generate("classify this", 128, 0.0).unwrap();

        let request = provider.last_request().unwrap();
        assert_eq!(request.prompt, "classify this");
        assert_eq!(request.max_tokens, 128);
        assert_eq!(request.temperature, 0.0);
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test", 300, 0.0).unwrap();

        // Both should share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_provider_enum_dispatches_to_mock() {
        let mock = MockProvider::new("from enum");
        let provider = Provider::from(mock.clone());

        assert_eq!(provider.name(), "mock");
        assert_eq!(provider.generate("p", 300, 0.0).unwrap(), "from enum");
        assert_eq!(mock.call_count(), 1);
    }
}
