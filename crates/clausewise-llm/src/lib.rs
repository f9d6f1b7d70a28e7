//! Clausewise LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `clausewise-domain`.
//! Every provider is constructed explicitly and handed to the analyzer;
//! there is no process-wide client.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Generative Language API
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use clausewise_llm::MockProvider;
//! use clausewise_domain::LlmProvider;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod ollama;

use clausewise_domain::LlmProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Missing or rejected credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Map a non-success HTTP status from a provider API to an error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String, model: &str) -> LlmError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status, body))
        }
        reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        _ => LlmError::Communication(format!("HTTP {}: {}", status, body)),
    }
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// Every prompt it receives is recorded so tests can inspect what was sent.
///
/// # Examples
///
/// ```
/// use clausewise_llm::MockProvider;
/// use clausewise_domain::LlmProvider;
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate("prompt1").await.unwrap(), "response1");
/// assert_eq!(provider.prompts(), vec!["prompt1".to_string()]);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    fail_all: bool,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            fail_all: false,
        }
    }

    /// Create a provider that fails every call, as an unreachable model would
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(prompt.into(), MockReply::Text(response.into()));
        }
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(prompt.into(), MockReply::Error);
        }
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// All prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().ok().and_then(|p| p.last().cloned())
    }

    /// Forget recorded prompts
    pub fn reset(&self) {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.clear();
        }
    }

    fn reply(&self, prompt: &str) -> Result<String, LlmError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if self.fail_all {
            return Err(LlmError::Communication("Mock model unreachable".to_string()));
        }

        let responses = self
            .responses
            .lock()
            .map_err(|e| LlmError::Other(format!("Mock lock poisoned: {}", e)))?;
        match responses.get(prompt) {
            Some(MockReply::Text(response)) => Ok(response.clone()),
            Some(MockReply::Error) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.reply(prompt)
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mapping() {
        use reqwest::StatusCode;

        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "denied".into(), "m"),
            LlmError::Authentication(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, String::new(), "m"),
            LlmError::ModelNotAvailable(name) if name == "m"
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new(), "m"),
            LlmError::RateLimitExceeded
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "upstream".into(), "m"),
            LlmError::Communication(msg) if msg.contains("502")
        ));
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt").await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("hello").await.unwrap(), "world");
        assert_eq!(provider.generate("foo").await.unwrap(), "bar");
        assert_eq!(provider.generate("unknown").await.unwrap(), "Default mock response");
    }

    #[tokio::test]
    async fn test_mock_provider_records_prompts() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);
        assert_eq!(provider.last_prompt(), None);

        provider.generate("prompt1").await.unwrap();
        provider.generate("prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);
        assert_eq!(provider.last_prompt().as_deref(), Some("prompt2"));

        provider.reset();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate("bad prompt").await;
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[tokio::test]
    async fn test_mock_provider_failing() {
        let provider = MockProvider::failing();
        let result = provider.generate("anything").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_history() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
