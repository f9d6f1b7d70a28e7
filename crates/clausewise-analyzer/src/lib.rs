//! Clausewise Analyzer
//!
//! Turns contract text into a structured analysis with a generative model.
//!
//! # Architecture
//!
//! ```text
//! blob key → TextExtractor → text → detect_type → analyze → ContractAnalysis
//! ```
//!
//! Type detection sends the first 2000 characters with a one-label
//! instruction. Analysis sends a tier-specific prompt with the full text
//! and parses the reply: a JSON object is passed through untouched,
//! anything else is scraped into a degraded `FallbackAnalysis`.
//!
//! # Example Usage
//!
//! ```
//! use clausewise_analyzer::ContractAnalyzer;
//! use clausewise_domain::Tier;
//! use clausewise_llm::MockProvider;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let llm = MockProvider::new(r#"{"summary": "Balanced lease", "overallScore": "72"}"#);
//! let analyzer = ContractAnalyzer::new(llm);
//!
//! let analysis = analyzer
//!     .analyze("This Lease is made between...", Tier::Free, "Lease")
//!     .await
//!     .unwrap();
//!
//! assert!(!analysis.is_degraded());
//! assert_eq!(analysis.report().overall_score.as_deref(), Some("72"));
//! # });
//! ```

#![warn(missing_docs)]

mod analyzer;
mod parser;
mod pipeline;
mod prompt;

pub use analyzer::ContractAnalyzer;
pub use parser::{clean_response, fallback_analysis, parse_analysis_response};
pub use pipeline::{ContractPipeline, PipelineError, PipelineOutcome};
pub use prompt::{truncate_chars, PromptBuilder, DETECTION_SAMPLE_CHARS};
