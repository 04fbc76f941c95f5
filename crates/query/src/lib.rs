//! Query validation, candidate filtering and vendor dialects.
//!
//! Turns a raw `SearchQuery` into something the registry search provider
//! understands, and narrows its results down to the offices and classes
//! the user actually asked about:
//! - Validation of mark text and Nice classes
//! - Office code normalisation (country names, EU/WIPO)
//! - Vendor query parameters (tmsearch)
//! - Deterministic search variants

mod filter;
mod offices;
mod variants;

pub use filter::CandidateFilter;
pub use offices::{is_eu_member, normalize_office_code, office_name, EU_COUNTRIES};
pub use variants::{generate_variants, SearchVariant, VariantKind, DEFAULT_MAX_VARIANTS};

use markencheck_model::SearchQuery;
use thiserror::Error;

/// Highest Nice classification class number.
pub const MAX_NICE_CLASS: u16 = 45;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Empty query text")]
    EmptyQuery,
    #[error("Invalid class number: {0}")]
    InvalidClass(u16),
}

/// Validate and canonicalise a query.
///
/// Trims the mark text, sorts and deduplicates classes, and normalises
/// office codes. An empty mark text or a class outside 1-45 is rejected.
pub fn validate(query: &SearchQuery) -> Result<SearchQuery, QueryError> {
    let mark_text = query.mark_text.trim();
    if mark_text.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    if let Some(&bad) = query
        .classes
        .iter()
        .find(|&&c| c == 0 || c > MAX_NICE_CLASS)
    {
        return Err(QueryError::InvalidClass(bad));
    }

    let mut classes = query.classes.clone();
    classes.sort_unstable();
    classes.dedup();

    let mut offices: Vec<String> = query
        .offices
        .iter()
        .map(|o| normalize_office_code(o))
        .filter(|o| !o.is_empty())
        .collect();
    offices.sort();
    offices.dedup();

    Ok(SearchQuery {
        mark_text: mark_text.to_string(),
        classes,
        offices,
        status_filter: query.status_filter,
        limit: query.limit,
    })
}

/// Reduce a keyword to letters, digits and single spaces, as the search
/// provider rejects punctuation.
pub fn clean_keyword(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stable key for memoising a check by its inputs.
pub fn cache_key(query: &SearchQuery) -> String {
    let mut classes = query.classes.clone();
    classes.sort_unstable();
    let mut offices = query.offices.clone();
    offices.sort();

    format!(
        "{}_{}_{}",
        query.mark_text.trim().to_lowercase(),
        classes.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(","),
        offices.join(",")
    )
}

/// Trait for translating queries to backend-specific syntax.
pub trait QueryDialect {
    /// The output type (usually String or a structured query)
    type Output;

    /// Translate a SearchQuery to this dialect
    fn translate(&self, query: &SearchQuery) -> Result<Self::Output, QueryError>;
}

/// tmsearch.ai query parameter generator.
///
/// The provider only takes a keyword; classes and offices are applied
/// locally through [`CandidateFilter`].
#[derive(Debug, Default)]
pub struct TmSearchDialect;

impl QueryDialect for TmSearchDialect {
    type Output = Vec<(String, String)>;

    fn translate(&self, query: &SearchQuery) -> Result<Self::Output, QueryError> {
        let keyword = clean_keyword(&query.mark_text);
        if keyword.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        Ok(vec![("keyword".to_string(), keyword)])
    }
}
