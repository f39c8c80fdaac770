//! OpenAI Provider Implementation
//!
//! Hosted chat-style backend speaking the `/chat/completions` API.
//!
//! # Features
//!
//! - Async HTTP communication with a blocking `TextGenerator` wrapper
//! - Configurable base URL (for compatible gateways) and model
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use policylens_llm::OpenAiProvider;
//! use policylens_domain::TextGenerator;
//! use secrecy::SecretString;
//!
//! let provider = OpenAiProvider::new(SecretString::from("sk-...".to_string()), "gpt-3.5-turbo")?;
//! let reply = provider.generate("Say hello", 300, 0.0)?;
//! # Ok::<(), policylens_llm::LlmError>(())
//! ```

use crate::chat::{self, ChatClient, ChatRequest, DEFAULT_TIMEOUT_SECS};
use crate::LlmError;
use policylens_domain::TextGenerator;
use secrecy::SecretString;
use std::time::Duration;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat-completions provider
#[derive(Debug)]
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    client: ChatClient,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider against the public endpoint
    ///
    /// # Parameters
    ///
    /// - `api_key`: API key, sent as a bearer token
    /// - `model`: Model to use (e.g., "gpt-3.5-turbo")
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            client: ChatClient::new(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
        })
    }

    /// Set a custom base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the maximum number of attempts per call
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.client.set_max_retries(max_retries);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client.set_timeout(timeout)?;
        Ok(self)
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Generate text using the chat-completions API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The credential is rejected
    /// - Model is not available
    /// - Network communication fails or times out
    /// - Response format is invalid
    pub async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let request = ChatRequest::user(&self.model, prompt, max_tokens, temperature);
        self.client.complete(&self.endpoint(), &request).await
    }
}

impl TextGenerator for OpenAiProvider {
    type Error = LlmError;

    fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, Self::Error> {
        chat::block_on(self.complete(prompt, max_tokens, temperature))?
    }
}
