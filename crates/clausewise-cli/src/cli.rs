//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Clausewise - Analyze contracts for risks and opportunities.
#[derive(Debug, Parser)]
#[command(name = "clausewise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key for the model provider, overriding the configured variable
    #[arg(long, global = true, env = "CLAUSEWISE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the plain text of a contract
    Extract(InputArgs),

    /// Ask the model what kind of contract this is
    DetectType(InputArgs),

    /// Analyze a contract for risks and opportunities
    Analyze(AnalyzeArgs),
}

/// Where the contract comes from.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Local PDF file
    pub file: Option<PathBuf>,

    /// Key of an upload already in the configured cache directory
    #[arg(short, long)]
    pub key: Option<String>,
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Analysis depth
    #[arg(short, long, value_enum, default_value = "free")]
    pub tier: TierArg,

    /// Contract type; detected by the model when omitted
    #[arg(long)]
    pub contract_type: Option<String>,
}

/// Tier argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TierArg {
    /// At least 5 risks and opportunities, summary and score
    Free,
    /// Full report with severities, clauses and financial terms
    Premium,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<TierArg> for clausewise_domain::Tier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Free => clausewise_domain::Tier::Free,
            TierArg::Premium => clausewise_domain::Tier::Premium,
        }
    }
}
