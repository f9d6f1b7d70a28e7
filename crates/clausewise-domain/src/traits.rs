//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// Trait for generative-language-model operations
///
/// Implemented by the infrastructure layer (clausewise-llm). A call is
/// single-shot: one prompt in, the model's raw text out. No streaming, no
/// function calling, no retries.
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a text completion for the prompt
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Name of the model behind this provider, for logging
    fn model_name(&self) -> &str;
}
