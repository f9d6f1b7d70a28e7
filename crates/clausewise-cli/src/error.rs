//! Error types for the CLI application.

use clausewise_analyzer::PipelineError;
use clausewise_extractor::ExtractionError;
use clausewise_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text extraction failed
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Model provider could not be built or called
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<PipelineError<LlmError>> for CliError {
    fn from(err: PipelineError<LlmError>) -> Self {
        match err {
            PipelineError::Extraction(e) => CliError::Extraction(e),
            PipelineError::Model(e) => CliError::Llm(e),
        }
    }
}
