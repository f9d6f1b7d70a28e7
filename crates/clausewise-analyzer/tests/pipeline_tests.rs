//! Integration tests for ContractPipeline

use clausewise_analyzer::{
    ContractAnalyzer, ContractPipeline, PipelineError, PromptBuilder,
};
use clausewise_domain::Tier;
use clausewise_extractor::{
    BlobValue, DocumentError, DocumentParser, ExtractionError, MemoryBlobCache,
    PaginatedDocument, TextExtractor,
};
use clausewise_llm::{LlmError, MockProvider};

/// Plain UTF-8 document: pages split on form feed, one fragment per word
struct PlainTextParser;

struct PlainTextDocument(Vec<String>);

impl DocumentParser for PlainTextParser {
    type Document = PlainTextDocument;

    fn parse(&self, bytes: &[u8]) -> Result<Self::Document, DocumentError> {
        let text =
            std::str::from_utf8(bytes).map_err(|e| DocumentError::Malformed(e.to_string()))?;
        Ok(PlainTextDocument(
            text.split('\x0c').map(str::to_string).collect(),
        ))
    }
}

impl PaginatedDocument for PlainTextDocument {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn page_fragments(&self, page: usize) -> Result<Vec<String>, DocumentError> {
        Ok(self.0[page - 1]
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }
}

const LEASE_TEXT: &str = "This Lease is made\x0cbetween Landlord and Tenant.";
const LEASE_EXTRACTED: &str = "This Lease is made\nbetween Landlord and Tenant.";

fn pipeline(
    provider: MockProvider,
) -> ContractPipeline<MemoryBlobCache, PlainTextParser, MockProvider> {
    let cache = MemoryBlobCache::new();
    cache.insert("upload-1", BlobValue::Bytes(LEASE_TEXT.as_bytes().to_vec()));
    ContractPipeline::new(
        TextExtractor::new(cache, PlainTextParser),
        ContractAnalyzer::new(provider),
    )
}

#[tokio::test]
async fn test_extract_only() {
    let pipeline = pipeline(MockProvider::default());
    assert_eq!(pipeline.extract("upload-1").await.unwrap(), LEASE_EXTRACTED);
}

#[tokio::test]
async fn test_analyze_detects_type_when_absent() {
    let mut provider = MockProvider::new(r#"{"summary": "Residential lease"}"#);
    provider.add_response(PromptBuilder::new(LEASE_EXTRACTED).detection(), " Lease\n");
    let pipeline = pipeline(provider.clone());

    let outcome = pipeline.analyze("upload-1", Tier::Free, None).await.unwrap();

    assert_eq!(outcome.contract_type, "Lease");
    assert!(!outcome.analysis.is_degraded());
    assert_eq!(
        outcome.analysis.report().summary.as_deref(),
        Some("Residential lease")
    );

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(
        prompts[1],
        PromptBuilder::new(LEASE_EXTRACTED).analysis(Tier::Free, "Lease")
    );
}

#[tokio::test]
async fn test_given_type_skips_detection() {
    let provider = MockProvider::new("{}");
    let pipeline = pipeline(provider.clone());

    let outcome = pipeline
        .analyze("upload-1", Tier::Premium, Some("Commercial Lease".to_string()))
        .await
        .unwrap();

    assert_eq!(outcome.contract_type, "Commercial Lease");
    assert_eq!(provider.call_count(), 1);
    assert!(provider
        .last_prompt()
        .unwrap()
        .starts_with("Analyze the following Commercial Lease contract"));
}

#[tokio::test]
async fn test_extraction_failure_stops_before_model() {
    let provider = MockProvider::new("{}");
    let pipeline = pipeline(provider.clone());

    let err = pipeline
        .analyze("missing", Tier::Free, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Extraction(ExtractionError::NotFound(_))
    ));
    assert!(err.to_string().starts_with("Failed to extract text from PDF"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_detection_failure_is_model_error() {
    let provider = MockProvider::failing();
    let pipeline = pipeline(provider.clone());

    let err = pipeline.detect_type("upload-1").await.unwrap_err();
    assert!(matches!(err, PipelineError::Model(LlmError::Communication(_))));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_analysis_failure_after_detection() {
    let mut provider = MockProvider::new("Lease");
    provider.add_error(PromptBuilder::new(LEASE_EXTRACTED).analysis(Tier::Free, "Lease"));
    let pipeline = pipeline(provider.clone());

    let err = pipeline.analyze("upload-1", Tier::Free, None).await.unwrap_err();
    assert!(matches!(err, PipelineError::Model(LlmError::Other(_))));
    assert_eq!(provider.call_count(), 2);
}
