//! End-to-end pipeline: cached upload to contract analysis

use crate::analyzer::ContractAnalyzer;
use clausewise_domain::{ContractAnalysis, LlmProvider, Tier};
use clausewise_extractor::{BlobCache, DocumentParser, ExtractionError, TextExtractor};
use thiserror::Error;
use tracing::info;

/// Errors surfaced by [`ContractPipeline`]
///
/// `E` is the model provider's error type, carried through unchanged.
#[derive(Error, Debug)]
pub enum PipelineError<E>
where
    E: std::error::Error + 'static,
{
    /// Text extraction failed
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The model call failed
    #[error(transparent)]
    Model(E),
}

/// Result of a full pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Contract type used in the analysis prompt, given or detected
    pub contract_type: String,
    /// The analysis itself
    pub analysis: ContractAnalysis,
}

/// Runs extraction, type detection and analysis for one upload at a time
///
/// Steps run strictly in sequence; nothing is shared between requests
/// besides the collaborators passed to [`ContractPipeline::new`].
pub struct ContractPipeline<C, P, L>
where
    C: BlobCache,
    P: DocumentParser,
    L: LlmProvider,
{
    extractor: TextExtractor<C, P>,
    analyzer: ContractAnalyzer<L>,
}

impl<C, P, L> ContractPipeline<C, P, L>
where
    C: BlobCache,
    P: DocumentParser,
    L: LlmProvider,
{
    /// Create a new pipeline
    pub fn new(extractor: TextExtractor<C, P>, analyzer: ContractAnalyzer<L>) -> Self {
        Self {
            extractor,
            analyzer,
        }
    }

    /// The text extractor
    pub fn extractor(&self) -> &TextExtractor<C, P> {
        &self.extractor
    }

    /// The contract analyzer
    pub fn analyzer(&self) -> &ContractAnalyzer<L> {
        &self.analyzer
    }

    /// Extract the text stored under `blob_key`
    pub async fn extract(&self, blob_key: &str) -> Result<String, ExtractionError> {
        self.extractor.extract_text(blob_key).await
    }

    /// Extract then classify
    pub async fn detect_type(&self, blob_key: &str) -> Result<String, PipelineError<L::Error>> {
        let text = self.extractor.extract_text(blob_key).await?;
        self.analyzer
            .detect_type(&text)
            .await
            .map_err(PipelineError::Model)
    }

    /// Extract, classify when no type is given, then analyze
    ///
    /// A supplied `contract_type` skips detection; the model is then called
    /// exactly once.
    pub async fn analyze(
        &self,
        blob_key: &str,
        tier: Tier,
        contract_type: Option<String>,
    ) -> Result<PipelineOutcome, PipelineError<L::Error>> {
        let text = self.extractor.extract_text(blob_key).await?;

        let contract_type = match contract_type {
            Some(given) => given,
            None => self
                .analyzer
                .detect_type(&text)
                .await
                .map_err(PipelineError::Model)?,
        };

        let analysis = self
            .analyzer
            .analyze(&text, tier, &contract_type)
            .await
            .map_err(PipelineError::Model)?;

        info!(
            blob_key,
            %tier,
            contract_type = %contract_type,
            degraded = analysis.is_degraded(),
            "Pipeline finished"
        );

        Ok(PipelineOutcome {
            contract_type,
            analysis,
        })
    }
}
