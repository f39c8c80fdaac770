//! Chat-completions wire format and HTTP loop shared by the hosted providers
//!
//! Both hosted backends speak the same `choices[0].message.content` dialect;
//! they differ only in URL layout, which the caller supplies.

use crate::LlmError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tokio::runtime::{Handle, RuntimeFlavor};
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per generate call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Upper bound on a single backoff sleep
pub const MAX_BACKOFF_SECS: u64 = 30;

/// Request body for a chat completion
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// Single user turn carrying the whole prompt
    pub fn user(model: &'a str, prompt: &'a str, max_tokens: u32, temperature: f32) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
            temperature,
        }
    }
}

/// Response from a chat completion
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice
    pub fn into_text(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
    }
}

/// HTTP plumbing for one hosted backend
pub(crate) struct ChatClient {
    client: reqwest::Client,
    credential: SecretString,
    timeout: Duration,
    max_retries: u32,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("credential", &self.credential)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl ChatClient {
    pub fn new(credential: SecretString, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            credential,
            timeout,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> Result<(), LlmError> {
        self.client = build_http_client(timeout)?;
        self.timeout = timeout;
        Ok(())
    }

    pub fn set_max_retries(&mut self, max_retries: u32) {
        self.max_retries = max_retries.max(1);
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST a chat request, retrying transient failures with exponential backoff
    pub async fn complete(&self, url: &str, request: &ChatRequest<'_>) -> Result<String, LlmError> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(url)
                .bearer_auth(self.credential.expose_secret())
                .json(request)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.json::<ChatResponse>().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return body.into_text();
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    let error = status_error(status.as_u16(), &error_text, request.model);
                    if !is_retryable(status.as_u16()) {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
                Err(e) if e.is_timeout() => {
                    last_error = Some(LlmError::Timeout(self.timeout));
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = backoff_delay(attempts);
                warn!(
                    "Attempt {}/{} to {} failed, retrying in {:?}",
                    attempts, self.max_retries, url, delay
                );
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            LlmError::Communication("Max retries exceeded".to_string())
        }))
    }
}

/// Exponential backoff after the `attempt`-th failure: 1s, 2s, 4s, capped at [`MAX_BACKOFF_SECS`]
fn backoff_delay(attempt: u32) -> Duration {
    let secs = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_secs(secs.min(MAX_BACKOFF_SECS))
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    // Each blocking call runs on its own short-lived runtime, so idle
    // connections must not outlive it.
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))
}

/// Map a non-success HTTP status to a provider error
pub(crate) fn status_error(status: u16, body: &str, model: &str) -> LlmError {
    match status {
        401 | 403 => LlmError::Authentication(format!("HTTP {}: {}", status, body)),
        404 => LlmError::ModelNotAvailable(model.to_string()),
        429 => LlmError::RateLimitExceeded,
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

fn is_retryable(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Run an async provider call to completion from synchronous code
///
/// Outside a runtime a current-thread runtime is built for the call. Inside a
/// multi-thread runtime the worker is handed over with `block_in_place`. A
/// current-thread runtime cannot be blocked, so that case is an error and the
/// caller should await `complete` instead.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    match Handle::try_current() {
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::MultiThread => {
                debug!("Running provider call on the surrounding multi-thread runtime");
                Ok(tokio::task::block_in_place(|| handle.block_on(future)))
            }
            _ => Err(LlmError::Other(
                "generate called from within a current-thread async runtime; use complete()"
                    .to_string(),
            )),
        },
        Err(_) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
            debug!("Running provider call on a current-thread runtime");
            Ok(runtime.block_on(future))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest::user("gpt-3.5-turbo", "Classify this", 300, 0.0);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Classify this");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_chat_response_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"classification\":\"Weak\"}"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), r#"{"classification":"Weak"}"#);
    }

    #[test]
    fn test_chat_response_without_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(response.into_text(), Err(LlmError::InvalidResponse(_))));

        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(response.into_text(), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(status_error(401, "bad key", "m"), LlmError::Authentication(_)));
        assert!(matches!(status_error(403, "", "m"), LlmError::Authentication(_)));
        assert!(matches!(status_error(429, "", "m"), LlmError::RateLimitExceeded));
        assert!(matches!(status_error(500, "", "m"), LlmError::Communication(_)));

        match status_error(404, "", "gpt-x") {
            LlmError::ModelNotAvailable(model) => assert_eq!(model, "gpt-x"),
            other => panic!("Expected ModelNotAvailable, got {:?}", other),
        }
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(429));
        assert!(is_retryable(503));
        assert!(!is_retryable(400));
        assert!(!is_retryable(401));
        assert!(!is_retryable(404));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let client = ChatClient::new(
            SecretString::from("sk-very-secret".to_string()),
            Duration::from_secs(5),
        )
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("sk-very-secret"));
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
        assert_eq!(backoff_delay(10), Duration::from_secs(MAX_BACKOFF_SECS));
        assert_eq!(backoff_delay(64), Duration::from_secs(MAX_BACKOFF_SECS));
        assert_eq!(backoff_delay(u32::MAX), Duration::from_secs(MAX_BACKOFF_SECS));
    }

    #[test]
    fn test_block_on_without_runtime() {
        assert_eq!(block_on(async { 7 }).unwrap(), 7);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_block_on_inside_multi_thread_runtime() {
        assert_eq!(block_on(async { 7 }).unwrap(), 7);
    }

    #[tokio::test]
    async fn test_block_on_inside_current_thread_runtime_is_an_error() {
        assert!(matches!(block_on(async { 7 }), Err(LlmError::Other(_))));
    }
}
