//! Core TextExtractor implementation

use crate::cache::BlobCache;
use crate::document::{DocumentParser, PaginatedDocument};
use crate::error::{DocumentError, ExtractionError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reads an upload from the blob cache and returns its plain text
pub struct TextExtractor<C, P>
where
    C: BlobCache,
    P: DocumentParser,
{
    cache: C,
    parser: Arc<P>,
}

impl<C, P> TextExtractor<C, P>
where
    C: BlobCache,
    P: DocumentParser,
{
    /// Create a new TextExtractor
    pub fn new(cache: C, parser: P) -> Self {
        Self {
            cache,
            parser: Arc::new(parser),
        }
    }

    /// The underlying cache
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Extract the text of every page of the document stored under `blob_key`
    ///
    /// Performs exactly one cache read. On failure no partial text is returned.
    pub async fn extract_text(&self, blob_key: &str) -> Result<String, ExtractionError> {
        self.extract_inner(blob_key)
            .await
            .inspect_err(|e| warn!(blob_key, error = %e, "Text extraction failed"))
    }

    async fn extract_inner(&self, blob_key: &str) -> Result<String, ExtractionError> {
        if blob_key.is_empty() {
            return Err(ExtractionError::EmptyKey);
        }

        let value = self
            .cache
            .get(blob_key)
            .await
            .map_err(|e| ExtractionError::Cache {
                key: blob_key.to_string(),
                source: Box::new(e),
            })?
            .ok_or_else(|| ExtractionError::NotFound(blob_key.to_string()))?;

        let bytes = value.into_bytes()?;
        debug!(blob_key, bytes = bytes.len(), "Decoded upload");

        // Parsing is CPU-bound; keep it off the async workers
        let parser = Arc::clone(&self.parser);
        let text = tokio::task::spawn_blocking(move || render_text(parser.as_ref(), &bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))??;

        info!(blob_key, chars = text.len(), "Extracted contract text");
        Ok(text)
    }
}

/// Render a byte buffer to text: fragments joined by spaces, pages by newlines
pub fn render_text<P: DocumentParser>(parser: &P, bytes: &[u8]) -> Result<String, DocumentError> {
    let document = parser.parse(bytes)?;

    let pages = (1..=document.page_count())
        .map(|page| document.page_fragments(page).map(|fragments| fragments.join(" ")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(pages.join("\n"))
}
