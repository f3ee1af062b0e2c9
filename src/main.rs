use anyhow::{Context, Result};
use clap::Parser;
use prettytable::{row, Table};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use orgmatch::config::RunConfig;
use orgmatch::directory::DirectoryClient;
use orgmatch::matching::types::export_rows;
use orgmatch::pipeline;

/// Batch organization name matcher: segments extracted names and reconciles
/// them against a company directory.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input text file with organization names (newline-, comma- or
    /// semicolon-separated)
    input: PathBuf,

    /// Output file for match results (JSON); stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory API to query (primary, secondary, mock)
    #[arg(long, default_value = "primary")]
    api: String,

    /// API key for the secondary directory service; falls back to the
    /// ORGMATCH_API_KEY environment variable
    #[arg(long)]
    api_key: Option<String>,

    /// Minimum composite similarity score for an accepted match (0-100)
    #[arg(long, default_value_t = 80.0)]
    min_score: f64,

    /// Delay between directory calls in seconds
    #[arg(long, default_value_t = 0.5)]
    delay: f64,

    /// Also run boundary detection with extended locale-specific patterns
    #[arg(long)]
    extended_patterns: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    orgmatch::logging::configure_logging();

    let cli = Cli::parse();

    let config = RunConfig {
        threshold: cli.min_score,
        api_choice: cli.api.parse()?,
        api_key: cli.api_key.or_else(|| std::env::var("ORGMATCH_API_KEY").ok()),
        min_call_delay: cli.delay,
        extended_patterns: cli.extended_patterns,
        ..Default::default()
    };
    config.validate()?;

    let content = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read input file {}", cli.input.display()))?;

    let blocks = pipeline::parse_pasted(&content);
    info!("Parsed {} name blocks from {}", blocks.len(), cli.input.display());

    let spans = pipeline::segment_blocks(&blocks, config.extended_patterns);

    let client = DirectoryClient::from_config(&config);
    let results = pipeline::match_spans(&spans, &config, &client).await;

    let rows = export_rows(&results);
    let serialized =
        serde_json::to_string_pretty(&rows).context("failed to serialize match results")?;

    match &cli.output {
        Some(path) => {
            fs::write(path, serialized)
                .with_context(|| format!("failed to write results to {}", path.display()))?;
            info!("Wrote {} result rows to {}", rows.len(), path.display());
        }
        None => println!("{serialized}"),
    }

    let matched = results.iter().filter(|r| r.best_record.is_some()).count();
    let accepted = results.iter().filter(|r| r.accepted).count();

    let mut summary = Table::new();
    summary.add_row(row!["Total names", results.len()]);
    summary.add_row(row!["Matched", matched]);
    summary.add_row(row!["Accepted", accepted]);
    summary.add_row(row!["Unmatched", results.len() - matched]);
    if !results.is_empty() {
        summary.add_row(row![
            "Match rate",
            format!("{:.1}%", accepted as f64 / results.len() as f64 * 100.0)
        ]);
    }
    // Summary goes to stderr, keeping stdout reserved for JSON results.
    summary
        .print(&mut std::io::stderr())
        .context("failed to print summary table")?;

    Ok(())
}
