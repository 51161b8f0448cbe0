//! CSV and console output for fetched papers.

use crate::error::Result;
use crate::pubmed::Paper;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{error, info};

/// CSV header, in column order
pub const CSV_COLUMNS: &[&str] = &[
    "PubmedID",
    "Title",
    "PublicationDate",
    "Non-academic Authors",
    "Company Affiliations",
    "Corresponding Author Email",
];

/// Separator for list-valued cells
const LIST_SEPARATOR: &str = ", ";

/// One CSV row; list fields are flattened into a single cell.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    pubmed_id: &'a str,
    title: &'a str,
    publication_date: &'a str,
    non_academic_authors: String,
    company_affiliations: String,
    corresponding_author_email: &'a str,
}

impl<'a> From<&'a Paper> for CsvRow<'a> {
    fn from(paper: &'a Paper) -> Self {
        Self {
            pubmed_id: &paper.pubmed_id,
            title: &paper.title,
            publication_date: &paper.publication_date,
            non_academic_authors: paper.non_academic_authors.join(LIST_SEPARATOR),
            company_affiliations: paper.company_affiliations.join(LIST_SEPARATOR),
            corresponding_author_email: &paper.corresponding_author_email,
        }
    }
}

/// Write papers to `path` as CSV, overwriting any existing file.
///
/// The header row is always written, even for an empty slice.
pub fn write_csv(papers: &[Paper], path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    wtr.write_record(CSV_COLUMNS)?;
    for paper in papers {
        wtr.serialize(CsvRow::from(paper))?;
    }

    wtr.flush()?;
    info!(path = %path.display(), rows = papers.len(), "Saved CSV");
    Ok(())
}

/// Write papers to `path`, logging instead of returning errors.
///
/// Returns whether the file was written.
pub fn save_csv(papers: &[Paper], path: &Path) -> bool {
    match write_csv(papers, path) {
        Ok(()) => true,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error saving CSV file");
            false
        }
    }
}

/// Render one paper as a console block. `index` is 1-based.
pub fn format_paper(index: usize, paper: &Paper) -> String {
    let mut out = String::new();
    let rule = "-".repeat(17);

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "Paper {}:", index);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "PubmedID: {}", paper.pubmed_id);
    let _ = writeln!(out, "Title: {}", paper.title);
    let _ = writeln!(out, "Publication Date: {}", paper.publication_date);
    let _ = writeln!(
        out,
        "Non-academic Authors: {}",
        join_or_none(&paper.non_academic_authors)
    );
    let _ = writeln!(
        out,
        "Company Affiliations: {}",
        join_or_none(&paper.company_affiliations)
    );
    let _ = writeln!(
        out,
        "Corresponding Author Email: {}",
        paper.corresponding_author_email
    );
    let _ = writeln!(out, "{}", "-".repeat(100));
    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(LIST_SEPARATOR)
    }
}
