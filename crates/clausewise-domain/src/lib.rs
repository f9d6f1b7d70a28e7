//! Clausewise Domain Layer
//!
//! Core vocabulary shared by every other crate: the service tier, the
//! shape of a contract analysis, and the trait seam for the generative
//! model. Infrastructure (HTTP clients, PDF parsing, caches) lives in
//! other crates.
//!
//! ## Key Concepts
//!
//! - **Tier**: free or premium, selecting prompt depth and result shape
//! - **ContractAnalysis**: either the model's object passed through as-is,
//!   or a degraded `FallbackAnalysis` scraped from malformed output
//! - **AnalysisReport**: lenient typed view over either variant

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use analysis::{
    AnalysisReport, ContractAnalysis, FallbackAnalysis, FinancialTerms, Opportunity, Risk,
    FALLBACK_SUMMARY, UNKNOWN_FIELD,
};
pub use tier::Tier;
pub use traits::LlmProvider;
