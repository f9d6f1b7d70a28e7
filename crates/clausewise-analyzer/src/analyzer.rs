//! Core ContractAnalyzer implementation

use crate::parser::parse_analysis_response;
use crate::prompt::PromptBuilder;
use clausewise_domain::{ContractAnalysis, LlmProvider, Tier};
use std::sync::Arc;
use tracing::{debug, info};

/// Classifies and analyzes contract text with a generative model
///
/// Holds no state besides the model handle; one value can serve any number
/// of concurrent requests.
pub struct ContractAnalyzer<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
}

impl<L> Clone for ContractAnalyzer<L>
where
    L: LlmProvider,
{
    fn clone(&self) -> Self {
        Self {
            llm_provider: Arc::clone(&self.llm_provider),
        }
    }
}

impl<L> ContractAnalyzer<L>
where
    L: LlmProvider,
{
    /// Create a new ContractAnalyzer
    pub fn new(llm_provider: L) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
        }
    }

    /// The underlying model provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Ask the model for a one-label contract type
    ///
    /// The label is whatever the model says, trimmed. Model errors are
    /// returned as-is; there is no default label.
    pub async fn detect_type(&self, text: &str) -> Result<String, L::Error> {
        let prompt = PromptBuilder::new(text).detection();
        debug!(
            model = self.llm_provider.model_name(),
            prompt_chars = prompt.len(),
            "Requesting contract type"
        );

        let response = self.llm_provider.generate(&prompt).await?;
        let contract_type = response.trim().to_string();

        info!(contract_type = %contract_type, "Detected contract type");
        Ok(contract_type)
    }

    /// Analyze contract text at the given tier
    ///
    /// Unusable model output degrades to [`ContractAnalysis::Fallback`];
    /// only a failed model call is an error.
    pub async fn analyze(
        &self,
        text: &str,
        tier: Tier,
        contract_type: &str,
    ) -> Result<ContractAnalysis, L::Error> {
        let prompt = PromptBuilder::new(text).analysis(tier, contract_type);
        debug!(
            model = self.llm_provider.model_name(),
            %tier,
            contract_type,
            prompt_chars = prompt.len(),
            "Requesting contract analysis"
        );

        let response = self.llm_provider.generate(&prompt).await?;
        debug!(response_chars = response.len(), "Received analysis response");

        let analysis = parse_analysis_response(&response);
        info!(
            %tier,
            contract_type,
            degraded = analysis.is_degraded(),
            "Contract analysis complete"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_llm::{LlmError, MockProvider};

    #[tokio::test]
    async fn test_detect_type_trims_response() {
        let analyzer = ContractAnalyzer::new(MockProvider::new("  Lease \n"));
        assert_eq!(analyzer.detect_type("text").await.unwrap(), "Lease");
    }

    #[tokio::test]
    async fn test_detect_type_is_not_validated() {
        let analyzer = ContractAnalyzer::new(MockProvider::new("Probably a lease, maybe?"));
        assert_eq!(
            analyzer.detect_type("text").await.unwrap(),
            "Probably a lease, maybe?"
        );
    }

    #[tokio::test]
    async fn test_detect_type_propagates_model_error() {
        let analyzer = ContractAnalyzer::new(MockProvider::failing());
        let err = analyzer.detect_type("text").await.unwrap_err();
        assert!(matches!(err, LlmError::Communication(_)));
    }

    #[tokio::test]
    async fn test_analyze_sends_one_prompt() {
        let provider = MockProvider::new(r#"{"summary": "fine"}"#);
        let analyzer = ContractAnalyzer::new(provider.clone());

        let analysis = analyzer.analyze("body", Tier::Free, "NDA").await.unwrap();
        assert!(!analysis.is_degraded());
        assert_eq!(provider.call_count(), 1);
        assert_eq!(
            provider.last_prompt().unwrap(),
            PromptBuilder::new("body").analysis(Tier::Free, "NDA")
        );
    }

    #[tokio::test]
    async fn test_analyze_absorbs_bad_output() {
        let analyzer = ContractAnalyzer::new(MockProvider::new("I cannot help with that."));
        let analysis = analyzer.analyze("body", Tier::Premium, "Sales").await.unwrap();
        assert!(analysis.is_degraded());
    }
}
