//! Detect-type command implementation.

use crate::error::Result;
use crate::output::Formatter;
use clausewise_analyzer::ContractPipeline;
use clausewise_domain::LlmProvider;
use clausewise_extractor::{BlobCache, DocumentParser};
use clausewise_llm::LlmError;
use std::io::Write;

/// Execute the detect-type command.
pub async fn execute_detect_type<C, P, L>(
    key: &str,
    pipeline: &ContractPipeline<C, P, L>,
    formatter: &Formatter,
    out: &mut impl Write,
) -> Result<()>
where
    C: BlobCache,
    P: DocumentParser,
    L: LlmProvider<Error = LlmError>,
{
    let contract_type = pipeline.detect_type(key).await?;
    writeln!(out, "{}", formatter.format_contract_type(&contract_type)?)?;
    Ok(())
}
