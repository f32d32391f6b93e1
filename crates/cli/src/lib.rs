//! # `tosdr-cli` Library Crate
//!
//! This crate contains the logic behind the `tosdr-extract` binary: argument and
//! environment handling, progress output, and writing the patterns file. The
//! extraction itself lives in `tosdr-patterns`.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tosdr_patterns::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_OUTPUT_FILE, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SERVICES,
    DEFAULT_SERVICE_DELAY,
};
use tosdr_patterns::{
    write_document, DedupPolicy, Extractor, PipelineConfig, ProgressEvent, RunReport,
    ServiceOutcome, SeverityTier, TosdrClient,
};
use tracing::info;

const RULE: &str = "============================================================";

// --- CLI Argument Struct ---

/// Fetch ToS;DR evaluations for well-known services and write them as a patterns file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Where to write the generated JSON file.
    #[arg(long, env = "TOSDR_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
    /// Base URL of the ToS;DR API.
    #[arg(long, env = "TOSDR_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,
    /// Comma-separated service names to search for. Defaults to the built-in list.
    #[arg(long, env = "TOSDR_SERVICES", value_delimiter = ',')]
    pub services: Option<Vec<String>>,
    /// Pause between services, in milliseconds.
    #[arg(long, env = "TOSDR_DELAY_MS", default_value_t = DEFAULT_SERVICE_DELAY.as_millis() as u64)]
    pub delay_ms: u64,
    /// Per-request timeout, in seconds.
    #[arg(long, env = "TOSDR_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
    /// Credit every service that shares a title instead of only the first one.
    #[arg(long, env = "TOSDR_MERGE_DUPLICATES")]
    pub merge_duplicate_services: bool,
}

impl Cli {
    /// The service names to process, trimmed, with blanks dropped.
    pub fn service_names(&self) -> Vec<String> {
        match &self.services {
            Some(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Resolves the arguments into the pipeline's immutable configuration.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            service_delay: Duration::from_millis(self.delay_ms),
            dedup: if self.merge_duplicate_services {
                DedupPolicy::MergeServices
            } else {
                DedupPolicy::FirstTitleWins
            },
            ..PipelineConfig::with_services(self.service_names())
        }
    }
}

// --- Public Entrypoint ---

/// Runs a full extraction and writes the result to `cli.output`.
///
/// Skipped services never fail the run; only an unusable HTTP client or an
/// unwritable output file do.
pub async fn run(cli: Cli) -> Result<RunReport> {
    info!("Starting extraction with args: {:?}", cli);
    let config = cli.pipeline_config();

    println!("{RULE}");
    println!("🔍 ToS;DR Privacy Pattern Extractor");
    println!("{RULE}");
    println!();

    let client = TosdrClient::new(&cli.api_base_url, Duration::from_secs(cli.timeout_secs))
        .context("Failed to build the HTTP client")?;
    let extractor = Extractor::new(client, config);

    println!("📂 Fetching case catalogue...");
    let report = extractor.run_with_progress(print_progress).await;

    print_summary(&report);

    let bytes = write_document(&report.document, &cli.output)
        .with_context(|| format!("Could not save '{}'", cli.output.display()))?;

    println!();
    println!("{RULE}");
    println!(
        "✅ Saved: {} ({:.1} KB)",
        cli.output.display(),
        bytes as f64 / 1024.0
    );
    println!("{RULE}");

    if report.document.metadata.total_points == 0 {
        println!();
        println!("⚠️ No data could be retrieved. Check your internet connection.");
    }

    Ok(report)
}

// --- Console Output ---

fn print_progress(event: ProgressEvent<'_>) {
    match event {
        ProgressEvent::CaseCatalogue { available } => {
            match available {
                Some(n) => println!("   → {n} cases available"),
                None => println!("   ⚠️ Could not fetch the case catalogue (continuing)"),
            }
            println!();
        }
        ProgressEvent::ServiceStarted { index, total, name } => {
            if index == 0 {
                println!("📡 Fetching data for {total} services...");
                println!();
            }
            print!("   [{}/{}] {}... ", index + 1, total, name);
            let _ = io::stdout().flush();
        }
        ProgressEvent::ServiceFinished {
            outcome, rating, ..
        } => match outcome {
            ServiceOutcome::Processed { points, .. } => {
                let rating = rating.map(|r| format!(" ({r})")).unwrap_or_default();
                println!("✓ {points} points{rating}");
            }
            skipped => println!("⚠️ {}", skipped.describe()),
        },
    }
}

fn print_summary(report: &RunReport) {
    let doc = &report.document;
    println!();
    println!("{RULE}");
    println!("📊 Results:");
    println!("{RULE}");
    println!("   Services processed: {}", doc.metadata.total_services);
    println!("   Total points:       {}", doc.metadata.total_points);
    println!();
    for (label, tier) in [
        ("🔴 Critical:", SeverityTier::Critical),
        ("🟠 Bad:     ", SeverityTier::Bad),
        ("🟢 Good:    ", SeverityTier::Good),
        ("⚪ Neutral: ", SeverityTier::Neutral),
    ] {
        println!("   {} {} patterns", label, doc.patterns.tier(tier).len());
    }
    println!();
    println!("   By category:");
    for (_, summary) in doc.categories.ranked() {
        println!("     - {}: {}", summary.name, summary.count);
    }
}
