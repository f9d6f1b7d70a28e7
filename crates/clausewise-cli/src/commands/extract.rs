//! Extract command implementation.

use crate::error::Result;
use crate::output::Formatter;
use clausewise_extractor::{BlobCache, DocumentParser, TextExtractor};
use std::io::Write;

/// Execute the extract command.
pub async fn execute_extract<C, P>(
    key: &str,
    extractor: &TextExtractor<C, P>,
    formatter: &Formatter,
    out: &mut impl Write,
) -> Result<()>
where
    C: BlobCache,
    P: DocumentParser,
{
    let text = extractor.extract_text(key).await?;
    writeln!(out, "{}", formatter.format_text(&text)?)?;
    Ok(())
}
