//! Fetcher configuration.
//!
//! Endpoint URLs come from the environment (`BASE_URL`, `FETCH_URL`) and are
//! validated when the config is built, so a missing endpoint fails before any
//! request is made.

use crate::error::{FetchError, Result};
use url::Url;

/// Environment variable holding the esearch endpoint.
pub const SEARCH_URL_VAR: &str = "BASE_URL";

/// Environment variable holding the esummary endpoint.
pub const SUMMARY_URL_VAR: &str = "FETCH_URL";

/// Target database for both E-utilities calls.
pub const DEFAULT_DATABASE: &str = "pubmed";

/// Contact address sent with search requests.
pub const DEFAULT_EMAIL: &str = "your-email@example.com";

/// Result cap used when the caller does not supply one.
pub const DEFAULT_MAX_RESULTS: u32 = 100;

/// Which authors end up in the "non-academic" columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorFilter {
    /// Every author name and every non-empty affiliation.
    #[default]
    All,
    /// Only authors with an affiliation that does not look academic.
    NonAcademic,
}

/// Configuration for [`crate::pubmed::PubMedClient`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// esearch endpoint (identifier lookup)
    pub search_url: String,
    /// esummary endpoint (per-article metadata)
    pub summary_url: String,
    /// E-utilities `db` parameter
    pub database: String,
    /// Contact email sent as the `email` parameter
    pub email: String,
    /// Author classification mode
    pub author_filter: AuthorFilter,
}

impl FetcherConfig {
    /// Build a config from explicit endpoint URLs.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Config` if either URL is empty or not absolute.
    pub fn new(search_url: impl Into<String>, summary_url: impl Into<String>) -> Result<Self> {
        let search_url = validate_url(SEARCH_URL_VAR, search_url.into())?;
        let summary_url = validate_url(SUMMARY_URL_VAR, summary_url.into())?;

        Ok(Self {
            search_url,
            summary_url,
            database: DEFAULT_DATABASE.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            author_filter: AuthorFilter::All,
        })
    }

    /// Build a config from `BASE_URL` and `FETCH_URL`.
    ///
    /// Does not load `.env`; the binary does that before calling this.
    pub fn from_env() -> Result<Self> {
        let search_url = read_var(SEARCH_URL_VAR)?;
        let summary_url = read_var(SUMMARY_URL_VAR)?;
        Self::new(search_url, summary_url)
    }

    /// Set the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the author classification mode.
    pub fn with_author_filter(mut self, filter: AuthorFilter) -> Self {
        self.author_filter = filter;
        self
    }
}

fn read_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| FetchError::Config(format!("{} not found in environment variables", name)))
}

fn validate_url(name: &str, value: String) -> Result<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(FetchError::Config(format!("{} is empty", name)));
    }
    Url::parse(&value)
        .map_err(|e| FetchError::Config(format!("{} is not a valid URL ({}): {}", name, value, e)))?;
    Ok(value)
}
