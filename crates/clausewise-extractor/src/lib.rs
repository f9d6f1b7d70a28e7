//! Clausewise Extractor
//!
//! Turns an uploaded contract, held in a transient blob cache, into plain text.
//!
//! # Architecture
//!
//! ```text
//! blob key → BlobCache → bytes → DocumentParser → pages → text
//! ```
//!
//! Pages are joined with `\n` in ascending order; the text fragments of a
//! page are joined with single spaces. Any failure along the way yields one
//! [`ExtractionError`] and no partial text.
//!
//! # Example Usage
//!
//! ```no_run
//! use clausewise_extractor::{BlobValue, LopdfParser, MemoryBlobCache, TextExtractor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = MemoryBlobCache::new();
//! cache.insert("upload-1", BlobValue::Bytes(std::fs::read("contract.pdf")?));
//!
//! let extractor = TextExtractor::new(cache, LopdfParser);
//! let text = extractor.extract_text("upload-1").await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod document;
mod error;
mod extractor;

pub use cache::{BlobCache, BlobValue, CacheError, FsBlobCache, MemoryBlobCache};
pub use document::{DocumentParser, LopdfDocument, LopdfParser, PaginatedDocument};
pub use error::{DocumentError, ExtractionError};
pub use extractor::{render_text, TextExtractor};
