//! Clausewise CLI - Contract analysis from the command line.

use clap::Parser;
use clausewise_analyzer::{ContractAnalyzer, ContractPipeline};
use clausewise_cli::commands;
use clausewise_cli::source::{resolve_input, SourceCache};
use clausewise_cli::{Cli, Command, Config, Formatter, ModelProvider};
use clausewise_extractor::{LopdfParser, TextExtractor};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> clausewise_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api_key) = cli.api_key {
        config.llm.api_key = Some(api_key);
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.output.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.output.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);
    let mut stdout = std::io::stdout();

    match cli.command {
        Command::Extract(input) => {
            let (cache, key) = resolve_input(&input, &config).await?;
            let extractor = TextExtractor::new(cache, LopdfParser);
            commands::execute_extract(&key, &extractor, &formatter, &mut stdout).await?;
        }
        Command::DetectType(input) => {
            let (cache, key) = resolve_input(&input, &config).await?;
            let pipeline = build_pipeline(cache, &config)?;
            commands::execute_detect_type(&key, &pipeline, &formatter, &mut stdout).await?;
        }
        Command::Analyze(args) => {
            let (cache, key) = resolve_input(&args.input, &config).await?;
            let pipeline = build_pipeline(cache, &config)?;
            commands::execute_analyze(
                &key,
                args.tier.into(),
                args.contract_type,
                &pipeline,
                &formatter,
                &mut stdout,
            )
            .await?;
        }
    }

    Ok(())
}

fn build_pipeline(
    cache: SourceCache,
    config: &Config,
) -> clausewise_cli::Result<ContractPipeline<SourceCache, LopdfParser, ModelProvider>> {
    let provider = ModelProvider::from_config(config)?;
    Ok(ContractPipeline::new(
        TextExtractor::new(cache, LopdfParser),
        ContractAnalyzer::new(provider),
    ))
}

/// Log to stderr so stdout carries only command output
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
