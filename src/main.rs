//! pubmed-fetcher - PubMed search CLI
//!
//! ## Usage
//!
//! ```bash
//! pubmed-fetcher "cancer immunotherapy" 50 --file papers.csv
//! pubmed-fetcher "crispr" --debug
//! ```
//!
//! Requires `BASE_URL` (esearch) and `FETCH_URL` (esummary), read from the
//! environment or a `.env` file.

use anyhow::{Context, Result};
use clap::Parser;
use pubmed_fetcher::{
    config::{AuthorFilter, FetcherConfig, DEFAULT_EMAIL, DEFAULT_MAX_RESULTS},
    output,
    pubmed::PubMedClient,
};
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Fetch research papers from PubMed
#[derive(Parser)]
#[command(name = "pubmed-fetcher")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Search query
    query: String,

    /// Number of results (default: 100)
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    max_results: Option<u32>,

    /// Output CSV file name
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Contact email sent to the E-utilities service
    #[arg(long, env = "PUBMED_EMAIL", default_value = DEFAULT_EMAIL)]
    email: String,

    /// Keep only authors with a non-academic affiliation
    #[arg(long)]
    non_academic_only: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        error!("Error during execution: {:#}", e);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let author_filter = if cli.non_academic_only {
        AuthorFilter::NonAcademic
    } else {
        AuthorFilter::All
    };

    let config = FetcherConfig::from_env()
        .context("Failed to load endpoint configuration")?
        .with_email(cli.email)
        .with_author_filter(author_filter);
    let client = PubMedClient::new(config)?;

    let max_results = cli.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    let papers = client.fetch(&cli.query, max_results).await;

    match cli.file {
        Some(path) => {
            if output::save_csv(&papers, &path) {
                println!("Results saved to {}", path.display());
            }
        }
        None => {
            for (index, paper) in papers.iter().enumerate() {
                print!("{}", output::format_paper(index + 1, paper));
            }
        }
    }

    Ok(())
}
