//! Model provider selected by configuration.

use crate::config::{Config, ProviderKind};
use crate::error::{CliError, Result};
use clausewise_domain::LlmProvider;
use clausewise_llm::{GeminiProvider, LlmError, OllamaProvider};
use tracing::debug;

/// The provider named in `[llm] provider`
#[derive(Debug, Clone)]
pub enum ModelProvider {
    /// Google Generative Language API
    Gemini(GeminiProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
}

impl ModelProvider {
    /// Validate the configuration and build its provider.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let llm = &config.llm;

        let provider = match llm.provider {
            ProviderKind::Gemini => {
                let api_key = llm
                    .api_key
                    .clone()
                    .ok_or_else(|| CliError::Config("Gemini API key is missing".into()))?;
                ModelProvider::Gemini(GeminiProvider::with_endpoint(
                    llm.endpoint(),
                    api_key,
                    llm.model(),
                    llm.timeout(),
                )?)
            }
            ProviderKind::Ollama => ModelProvider::Ollama(OllamaProvider::with_timeout(
                llm.endpoint(),
                llm.model(),
                llm.timeout(),
            )?),
        };

        debug!(
            provider = ?llm.provider,
            model = provider.model_name(),
            endpoint = llm.endpoint(),
            "Model provider ready"
        );
        Ok(provider)
    }
}

impl LlmProvider for ModelProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> std::result::Result<String, Self::Error> {
        match self {
            ModelProvider::Gemini(provider) => provider.generate(prompt).await,
            ModelProvider::Ollama(provider) => provider.generate(prompt).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            ModelProvider::Gemini(provider) => provider.model_name(),
            ModelProvider::Ollama(provider) => provider.model_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_without_key_is_config_error() {
        let config = Config::default();
        let result = ModelProvider::from_config(&config);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_gemini_with_key() {
        let mut config = Config::default();
        config.llm.api_key = Some("secret".into());
        config.llm.model = Some("gemini-1.5-pro".into());

        let provider = ModelProvider::from_config(&config).unwrap();
        assert!(matches!(provider, ModelProvider::Gemini(_)));
        assert_eq!(provider.model_name(), "gemini-1.5-pro");
    }

    #[test]
    fn test_ollama() {
        let mut config = Config::default();
        config.llm.provider = ProviderKind::Ollama;

        let provider = ModelProvider::from_config(&config).unwrap();
        assert!(matches!(provider, ModelProvider::Ollama(_)));
        assert_eq!(provider.model_name(), clausewise_llm::ollama::DEFAULT_MODEL);
    }
}
