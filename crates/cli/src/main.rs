//! # tosdr-extract
//!
//! Thin entrypoint for the extractor. All logic is delegated to the `tosdr_cli`
//! library crate.

use anyhow::Result;
use clap::Parser;
use tosdr_cli::{run, Cli};
use tracing_subscriber::{fmt, EnvFilter};

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load `.env` overrides, then set up logging on stderr so stdout stays readable.
    dotenvy::dotenv().ok();
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tosdr=warn".parse()?))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Run to completion unless interrupted. Partial results are discarded on Ctrl-C.
    tokio::select! {
        result = run(cli) => {
            if let Err(e) = result {
                eprintln!("\n❌ Extraction failed: {:?}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n\n⚠️  Interrupted. Nothing was written.");
            std::process::exit(130);
        }
    }

    Ok(())
}
