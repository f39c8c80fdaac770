//! Hugging Face Provider Implementation
//!
//! Hosted inference-style backend. Models are addressed by repository id
//! (e.g. `meta-llama/Meta-Llama-3-8B-Instruct`) and called through the
//! per-model chat-completion route of the inference API.

use crate::chat::{self, ChatClient, ChatRequest, DEFAULT_TIMEOUT_SECS};
use crate::LlmError;
use policylens_domain::TextGenerator;
use secrecy::SecretString;
use std::time::Duration;

/// Default Hugging Face inference base URL
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Hugging Face inference provider
#[derive(Debug)]
pub struct HuggingFaceProvider {
    base_url: String,
    model: String,
    client: ChatClient,
}

impl HuggingFaceProvider {
    /// Create a new provider for a hosted model
    ///
    /// # Parameters
    ///
    /// - `api_token`: Hugging Face access token
    /// - `model`: Model repository id
    pub fn new(api_token: SecretString, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            client: ChatClient::new(api_token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
        })
    }

    /// Set a custom base URL (dedicated endpoints, proxies)
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

    /// Model repository id
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}/v1/chat/completions",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Generate text through the model's chat-completion route
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

impl TextGenerator for HuggingFaceProvider {
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
