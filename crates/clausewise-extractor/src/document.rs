//! Paginated-document seam and the lopdf-backed parser

use crate::error::DocumentError;
use lopdf::content::Content;
use lopdf::{Object, ObjectId};
use std::collections::BTreeMap;
use tracing::debug;

/// A parsed document that exposes text per page
pub trait PaginatedDocument {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Text fragments of a page, in reading order (`page` is 1-indexed)
    fn page_fragments(&self, page: usize) -> Result<Vec<String>, DocumentError>;
}

/// Parses raw bytes into a [`PaginatedDocument`]
///
/// Parsing runs on the blocking thread pool, hence `Send + Sync + 'static`.
pub trait DocumentParser: Send + Sync + 'static {
    /// Document type produced
    type Document: PaginatedDocument;

    /// Parse a byte buffer
    fn parse(&self, bytes: &[u8]) -> Result<Self::Document, DocumentError>;
}

/// PDF parser built on lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfParser;

/// A PDF loaded by [`LopdfParser`]
pub struct LopdfDocument {
    document: lopdf::Document,
    // Page object ids in ascending page-number order; index 0 is page 1
    page_ids: Vec<ObjectId>,
}

impl DocumentParser for LopdfParser {
    type Document = LopdfDocument;

    fn parse(&self, bytes: &[u8]) -> Result<Self::Document, DocumentError> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|e| DocumentError::Malformed(e.to_string()))?;
        let page_ids: Vec<ObjectId> = document.get_pages().into_values().collect();

        debug!(pages = page_ids.len(), bytes = bytes.len(), "Loaded PDF");

        Ok(LopdfDocument { document, page_ids })
    }
}

impl PaginatedDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_fragments(&self, page: usize) -> Result<Vec<String>, DocumentError> {
        let page_id = page
            .checked_sub(1)
            .and_then(|idx| self.page_ids.get(idx))
            .copied()
            .ok_or_else(|| DocumentError::Page {
                page,
                message: "page out of range".to_string(),
            })?;
        let page_error = |message: String| DocumentError::Page { page, message };

        let encodings: BTreeMap<Vec<u8>, &str> = self
            .document
            .get_page_fonts(page_id)
            .into_iter()
            .map(|(name, font)| (name, font.get_font_encoding()))
            .collect();
        let data = self
            .document
            .get_page_content(page_id)
            .map_err(|e| page_error(e.to_string()))?;
        let content = Content::decode(&data).map_err(|e| page_error(e.to_string()))?;

        let mut fragments = Vec::new();
        let mut encoding = None;
        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tf" => {
                    encoding = operation
                        .operands
                        .first()
                        .and_then(|name| name.as_name().ok())
                        .and_then(|name| encodings.get(name).copied());
                }
                // Each text-show operator is one fragment
                "Tj" | "TJ" | "'" | "\"" => {
                    let mut text = String::new();
                    collect_shown_text(&mut text, encoding, &operation.operands);
                    if !text.trim().is_empty() {
                        fragments.push(text);
                    }
                }
                _ => {}
            }
        }

        Ok(fragments)
    }
}

/// Append the strings among `operands`, decoded with the active font encoding
///
/// Numbers inside a `TJ` array are kerning adjustments; a large negative one
/// stands for a word gap.
fn collect_shown_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => {
                text.push_str(&lopdf::Document::decode_text(encoding, bytes));
            }
            Object::Array(items) => collect_shown_text(text, encoding, items),
            Object::Integer(adjust) if *adjust < -100 => text.push(' '),
            Object::Real(adjust) if *adjust < -100.0 => text.push(' '),
            _ => {}
        }
    }
}
