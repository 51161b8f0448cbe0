//! Affiliation heuristics.
//!
//! An affiliation is treated as academic when it mentions a university-style
//! institution or an academic mail domain. Everything else (pharma, biotech,
//! contract research companies) counts as non-academic.

use regex::Regex;
use std::sync::OnceLock;

/// Keyword stems and mail domains that mark an affiliation as academic.
const ACADEMIC_PATTERN: &str = r"(?i)\b(universit|college|institut|school|academy|hospital|faculty|department of|laborator|research cent|clinic)|\.edu\b|\.ac\.";

fn academic_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ACADEMIC_PATTERN).ok()).as_ref()
}

/// Returns true if the affiliation looks like an academic institution.
pub fn is_academic(affiliation: &str) -> bool {
    academic_regex().is_some_and(|re| re.is_match(affiliation))
}

/// Returns true if the affiliation is non-empty and not academic.
pub fn is_company(affiliation: &str) -> bool {
    let affiliation = affiliation.trim();
    !affiliation.is_empty() && !is_academic(affiliation)
}
