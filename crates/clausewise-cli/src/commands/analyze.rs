//! Analyze command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use clausewise_analyzer::ContractPipeline;
use clausewise_domain::{LlmProvider, Tier};
use clausewise_extractor::{BlobCache, DocumentParser};
use clausewise_llm::LlmError;
use std::io::Write;

/// Execute the analyze command.
pub async fn execute_analyze<C, P, L>(
    key: &str,
    tier: Tier,
    contract_type: Option<String>,
    pipeline: &ContractPipeline<C, P, L>,
    formatter: &Formatter,
    out: &mut impl Write,
) -> Result<()>
where
    C: BlobCache,
    P: DocumentParser,
    L: LlmProvider<Error = LlmError>,
{
    let contract_type = match contract_type.map(|t| t.trim().to_string()) {
        Some(t) if t.is_empty() => {
            return Err(CliError::InvalidInput(
                "--contract-type must not be empty".to_string(),
            ))
        }
        other => other,
    };

    let outcome = pipeline.analyze(key, tier, contract_type).await?;

    if outcome.analysis.is_degraded() {
        eprintln!(
            "{}",
            formatter.warning("The model did not return valid JSON; showing partially recovered results")
        );
    }

    writeln!(out, "{}", formatter.format_outcome(&outcome)?)?;
    Ok(())
}
