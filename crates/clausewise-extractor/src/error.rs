//! Error types for the Extractor

use thiserror::Error;

/// Errors raised while parsing a paginated document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The bytes are not a readable document
    #[error("malformed document: {0}")]
    Malformed(String),

    /// A page could not be read
    #[error("page {page}: {message}")]
    Page {
        /// 1-indexed page number
        page: usize,
        /// Underlying cause
        message: String,
    },
}

/// Errors that can occur while extracting text from a cached upload
///
/// Every variant renders with the same `Failed to extract text from PDF`
/// prefix so callers can surface it directly.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The blob key was empty
    #[error("Failed to extract text from PDF: blob key is empty")]
    EmptyKey,

    /// No blob exists under the key
    #[error("Failed to extract text from PDF: file not found for key '{0}'")]
    NotFound(String),

    /// The cached value is not a byte buffer
    #[error("Failed to extract text from PDF: invalid file data ({0})")]
    InvalidData(String),

    /// The cache read itself failed
    #[error("Failed to extract text from PDF: cache read failed for key '{key}': {source}")]
    Cache {
        /// Key being read
        key: String,
        /// Underlying cache error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The document could not be parsed
    #[error("Failed to extract text from PDF: {0}")]
    Document(#[from] DocumentError),

    /// The blocking parse task panicked or was cancelled
    #[error("Failed to extract text from PDF: extraction task failed: {0}")]
    Task(String),
}
