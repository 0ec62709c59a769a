//! buybox-checker - Amazon Buy Box lookup CLI backed by the Rainforest API
//!
//! Queries the Rainforest API for product and offer data and reports who
//! holds the Buy Box, at what price, and whether the offer is Prime or
//! discounted.

use anyhow::Result;
use buybox_checker::commands::{BatchCommand, LookupCommand};
use buybox_checker::config::{Config, DEFAULT_DOMAIN, DEFAULT_ENV_FILE, DEFAULT_WORKERS};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "buybox-checker",
    version,
    about = "Amazon Buy Box checker backed by the Rainforest API",
    long_about = "Looks up Amazon Buy Box ownership, pricing, and Prime status for a single ASIN or a CSV of ASINs via the Rainforest API."
)]
#[command(group(ArgGroup::new("mode").required(true).args(["asin", "input_csv"])))]
struct Cli {
    /// Single ASIN to look up (prints an aligned table)
    #[arg(long)]
    asin: Option<String>,

    /// CSV with an 'asin' column; results go to --output-csv
    #[arg(long, value_name = "PATH")]
    input_csv: Option<PathBuf>,

    /// Output CSV path for batch mode
    #[arg(long, value_name = "PATH", default_value = "rainforest_out.csv")]
    output_csv: PathBuf,

    /// Amazon domain (e.g., amazon.com, amazon.de)
    #[arg(long, default_value = DEFAULT_DOMAIN, env = "RAINFOREST_DOMAIN")]
    domain: String,

    /// Env file containing RAINFOREST_API_KEY
    #[arg(long, value_name = "PATH", default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Parallel workers for batch mode; lower this if the API answers with HTTP 429
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Resolve the API key before anything touches the network
    let mut config = Config::from_env_file(&cli.env_file)?;

    // Apply CLI overrides
    config.domain = cli.domain;
    config.workers = cli.workers;

    if let Some(asin) = cli.asin {
        let cmd = LookupCommand::new(config);
        let output = cmd.execute(&asin).await?;
        println!("{}", output);
    } else if let Some(input) = cli.input_csv {
        let cmd = BatchCommand::new(config);
        let summary = cmd.execute(&input, &cli.output_csv).await?;
        println!("{}", summary);
    }

    Ok(())
}
