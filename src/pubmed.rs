//! PubMed E-utilities client.
//!
//! Two sequential calls per fetch:
//! - esearch: query text -> ordered identifier list (`esearchresult.idlist`)
//! - esummary: comma-joined identifiers -> per-article summaries (`result.<id>`)
//!
//! Summaries are normalized into flat [`Paper`] records in search order.

use crate::classify;
use crate::config::{AuthorFilter, FetcherConfig};
use crate::error::{FetchError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

/// Placeholder for missing summary fields
pub const NOT_AVAILABLE: &str = "N/A";

/// One normalized PubMed article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub pubmed_id: String,
    pub title: String,
    /// Free-form date text as returned by esummary (e.g. "2023 Jan 15")
    pub publication_date: String,
    /// Author display names. With [`AuthorFilter::All`] this lists every author.
    pub non_academic_authors: Vec<String>,
    /// Lower-cased affiliations, one per author with a non-empty affiliation
    pub company_affiliations: Vec<String>,
    /// Taken from the summary `elocationid` field, which is usually a DOI
    /// or PII rather than an address.
    pub corresponding_author_email: String,
}

/// PubMed client. Immutable after construction, reusable across fetches.
pub struct PubMedClient {
    client: Client,
    config: FetcherConfig,
}

impl PubMedClient {
    /// Create a new client from a validated config.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!(
                "pubmed-fetcher/{} (mailto:{})",
                env!("CARGO_PKG_VERSION"),
                config.email
            ))
            .build()
            .map_err(|e| FetchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Fetch papers matching `query`, at most `max_results`.
    ///
    /// Any failure is logged and yields an empty list. Use [`Self::try_fetch`]
    /// to tell "no matches" apart from "request failed".
    pub async fn fetch(&self, query: &str, max_results: u32) -> Vec<Paper> {
        match self.try_fetch(query, max_results).await {
            Ok(papers) => papers,
            Err(e @ (FetchError::Network(_) | FetchError::Api { .. })) => {
                error!(error = %e, "Error fetching data from PubMed API");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "Unexpected error while fetching papers");
                Vec::new()
            }
        }
    }

    /// Fetch papers matching `query`, propagating failures.
    ///
    /// Returns `Ok(vec![])` when the search finds no identifiers.
    pub async fn try_fetch(&self, query: &str, max_results: u32) -> Result<Vec<Paper>> {
        debug!(query = query, max_results = max_results, "Fetching papers");

        let ids = self.search_ids(query, max_results).await?;
        if ids.is_empty() {
            info!(query = query, "No paper IDs found for query");
            return Ok(Vec::new());
        }

        debug!(ids = ?ids, "Paper IDs fetched");

        let summaries = self.fetch_summaries(&ids).await?;
        debug!(count = summaries.len(), "Paper summaries fetched");

        let papers = build_papers(&ids, &summaries, self.config.author_filter)?;
        info!(query = query, total = papers.len(), "PubMed fetch complete");
        Ok(papers)
    }

    /// esearch: identifier list in relevance order
    async fn search_ids(&self, query: &str, max_results: u32) -> Result<Vec<String>> {
        let retmax = max_results.to_string();
        let response = self
            .client
            .get(&self.config.search_url)
            .query(&[
                ("db", self.config.database.as_str()),
                ("term", query),
                ("retmax", retmax.as_str()),
                ("retmode", "json"),
                ("email", self.config.email.as_str()),
            ])
            .send()
            .await?;

        let body = read_body(response, "esearch").await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.esearchresult.idlist)
    }

    /// esummary: one batch request for all identifiers
    async fn fetch_summaries(&self, ids: &[String]) -> Result<Map<String, Value>> {
        let joined = ids.join(",");
        let response = self
            .client
            .get(&self.config.summary_url)
            .query(&[
                ("db", self.config.database.as_str()),
                ("id", joined.as_str()),
                ("retmode", "json"),
            ])
            .send()
            .await?;

        let body = read_body(response, "esummary").await?;
        let parsed: SummaryResponse = serde_json::from_str(&body)?;
        Ok(parsed.result)
    }
}

/// Return the response body, or an API error for non-2xx statuses.
async fn read_body(response: reqwest::Response, endpoint: &str) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Api {
            code: status.as_u16(),
            message: format!("{} returned {}", endpoint, status),
        });
    }
    Ok(response.text().await?)
}

// === E-utilities Response Types ===

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    esearchresult: SearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryResponse {
    // Holds one object per id plus a `uids` array
    #[serde(default)]
    result: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryEntry {
    title: Option<String>,
    pubdate: Option<String>,
    #[serde(default)]
    authors: Vec<SummaryAuthor>,
    elocationid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryAuthor {
    name: Option<String>,
    affiliation: Option<String>,
}

/// Normalize summaries into papers, one per identifier, in identifier order.
///
/// An identifier without a summary object yields a paper with placeholder fields.
fn build_papers(
    ids: &[String],
    summaries: &Map<String, Value>,
    filter: AuthorFilter,
) -> Result<Vec<Paper>> {
    ids.iter()
        .map(|id| -> Result<Paper> {
            let entry = match summaries.get(id) {
                Some(value @ Value::Object(_)) => SummaryEntry::deserialize(value)?,
                _ => SummaryEntry::default(),
            };
            Ok(parse_summary(id, entry, filter))
        })
        .collect()
}

fn parse_summary(id: &str, entry: SummaryEntry, filter: AuthorFilter) -> Paper {
    let mut names = Vec::new();
    let mut affiliations = Vec::new();

    for author in entry.authors {
        let affiliation = author.affiliation.unwrap_or_default().to_lowercase();
        let keep = match filter {
            AuthorFilter::All => {
                if let Some(name) = author.name {
                    names.push(name);
                }
                !affiliation.is_empty()
            }
            AuthorFilter::NonAcademic => {
                let company = classify::is_company(&affiliation);
                if company {
                    names.extend(author.name);
                }
                company
            }
        };
        if keep {
            affiliations.push(affiliation);
        }
    }

    Paper {
        pubmed_id: id.to_string(),
        title: entry.title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        publication_date: entry.pubdate.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        non_academic_authors: names,
        company_affiliations: affiliations,
        corresponding_author_email: entry
            .elocationid
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn summaries(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_build_papers_keeps_search_order() {
        let result = summaries(json!({
            "uids": ["2", "1"],
            "1": {"title": "First", "pubdate": "2023 Jan", "authors": [], "elocationid": "doi: 10.1/a"},
            "2": {"title": "Second", "pubdate": "2024", "authors": [], "elocationid": ""}
        }));

        let papers = build_papers(&ids(&["2", "1"]), &result, AuthorFilter::All).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].pubmed_id, "2");
        assert_eq!(papers[0].title, "Second");
        assert_eq!(papers[0].corresponding_author_email, "");
        assert_eq!(papers[1].pubmed_id, "1");
        assert_eq!(papers[1].corresponding_author_email, "doi: 10.1/a");
    }

    #[test]
    fn test_missing_summary_uses_placeholders() {
        let papers = build_papers(&ids(&["99"]), &Map::new(), AuthorFilter::All).unwrap();
        assert_eq!(
            papers[0],
            Paper {
                pubmed_id: "99".to_string(),
                title: "N/A".to_string(),
                publication_date: "N/A".to_string(),
                non_academic_authors: vec![],
                company_affiliations: vec![],
                corresponding_author_email: "N/A".to_string(),
            }
        );
    }

    #[test]
    fn test_affiliations_lowercased_and_empty_skipped() {
        let result = summaries(json!({
            "7": {
                "title": "T",
                "authors": [
                    {"name": "Author A", "affiliation": "Company X"},
                    {"name": "Author B", "affiliation": ""},
                    {"name": "Author C"}
                ]
            }
        }));

        let papers = build_papers(&ids(&["7"]), &result, AuthorFilter::All).unwrap();
        assert_eq!(papers[0].non_academic_authors, vec!["Author A", "Author B", "Author C"]);
        assert_eq!(papers[0].company_affiliations, vec!["company x"]);
        assert_eq!(papers[0].publication_date, "N/A");
    }

    #[test]
    fn test_author_without_name_is_skipped() {
        let result = summaries(json!({
            "7": {"authors": [{"affiliation": "Acme Corp"}, {"name": "Author B"}]}
        }));

        let papers = build_papers(&ids(&["7"]), &result, AuthorFilter::All).unwrap();
        assert_eq!(papers[0].non_academic_authors, vec!["Author B"]);
        assert_eq!(papers[0].company_affiliations, vec!["acme corp"]);
    }

    #[test]
    fn test_non_academic_filter() {
        let result = summaries(json!({
            "12345": {
                "authors": [
                    {"name": "Author A", "affiliation": "Company X"},
                    {"name": "Author B", "affiliation": "University Y"},
                    {"name": "Author C", "affiliation": ""}
                ]
            }
        }));

        let papers = build_papers(&ids(&["12345"]), &result, AuthorFilter::NonAcademic).unwrap();
        assert_eq!(papers[0].non_academic_authors, vec!["Author A"]);
        assert_eq!(papers[0].company_affiliations, vec!["company x"]);
    }

    #[test]
    fn test_malformed_summary_is_an_error() {
        let result = summaries(json!({"1": {"authors": "not a list"}}));
        let err = build_papers(&ids(&["1"]), &result, AuthorFilter::All).unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }
}
