//! # pubmed-fetcher
//!
//! Search PubMed, collect per-article metadata and flag non-academic authors.
//!
//! ## Modules
//!
//! - [`pubmed`] - E-utilities client (esearch + esummary)
//! - [`classify`] - Academic/company affiliation heuristic
//! - [`output`] - CSV and console output
//! - [`config`] - Endpoint configuration
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pubmed_fetcher::{config::FetcherConfig, output, pubmed::PubMedClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PubMedClient::new(FetcherConfig::from_env()?)?;
//!     let papers = client.fetch("crispr", 20).await;
//!     output::write_csv(&papers, std::path::Path::new("papers.csv"))?;
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod output;
pub mod pubmed;

pub use error::{FetchError, Result};
