// Facet filtering over catalog records
use crate::{Catalog, PropertyRecord};

pub trait Filter {
    fn matches(&self, record: &PropertyRecord) -> bool;
}

/// How the free-text `query` facet is compared against a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMatch {
    /// Whole query as a substring of description or name
    #[default]
    Substring,
    /// Any query token longer than three characters inside the description
    Tokens,
}

/// Tokens of this many characters or fewer are ignored in [`QueryMatch::Tokens`]
pub const SHORT_TOKEN_CHARS: usize = 3;

/// The facets a caller supplied, lowercased. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    destination: Option<String>,
    description: Option<String>,
    query: Option<String>,
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

impl Facets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location facet, checked against name, prefecture and address
    #[must_use]
    pub fn with_destination(mut self, value: Option<&str>) -> Self {
        self.destination = normalize(value);
        self
    }

    /// Style or theme facet, checked against the description
    #[must_use]
    pub fn with_description(mut self, value: Option<&str>) -> Self {
        self.description = normalize(value);
        self
    }

    #[must_use]
    pub fn with_query(mut self, value: Option<&str>) -> Self {
        self.query = normalize(value);
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.destination.is_none() && self.description.is_none() && self.query.is_none()
    }
}

enum QueryFacet {
    Phrase(String),
    Tokens(Vec<String>),
}

/// Split free text into lowercase tokens longer than [`SHORT_TOKEN_CHARS`],
/// with surrounding punctuation trimmed.
pub fn query_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|s| s.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|s| s.chars().count() > SHORT_TOKEN_CHARS)
        .collect()
}

#[inline]
fn contains_ci(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle)
}

/// Matches a record when ANY supplied facet matches; with no facets
/// supplied every record matches.
pub struct FacetFilter {
    destination: Option<String>,
    description: Option<String>,
    query: Option<QueryFacet>,
}

impl FacetFilter {
    pub fn new(facets: &Facets, mode: QueryMatch) -> Self {
        let query = facets.query.as_ref().map(|q| match mode {
            QueryMatch::Substring => QueryFacet::Phrase(q.clone()),
            QueryMatch::Tokens => QueryFacet::Tokens(query_tokens(q)),
        });

        Self {
            destination: facets.destination.clone(),
            description: facets.description.clone(),
            query,
        }
    }

    fn is_open(&self) -> bool {
        self.destination.is_none() && self.description.is_none() && self.query.is_none()
    }

    fn matches_destination(destination: &str, record: &PropertyRecord) -> bool {
        contains_ci(&record.name, destination)
            || contains_ci(&record.prefecture, destination)
            || contains_ci(&record.address, destination)
    }

    fn matches_query(query: &QueryFacet, record: &PropertyRecord) -> bool {
        match query {
            QueryFacet::Phrase(phrase) => {
                contains_ci(&record.description, phrase) || contains_ci(&record.name, phrase)
            }
            QueryFacet::Tokens(tokens) => {
                if tokens.is_empty() || record.description.is_empty() {
                    return false;
                }
                let description = record.description.to_lowercase();
                tokens.iter().any(|t| description.contains(t.as_str()))
            }
        }
    }
}

impl Filter for FacetFilter {
    fn matches(&self, record: &PropertyRecord) -> bool {
        if self.is_open() {
            return true;
        }

        if let Some(destination) = &self.destination {
            if Self::matches_destination(destination, record) {
                return true;
            }
        }

        if let Some(description) = &self.description {
            if contains_ci(&record.description, description) {
                return true;
            }
        }

        self.query
            .as_ref()
            .map(|q| Self::matches_query(q, record))
            .unwrap_or(false)
    }
}

/// Records accepted by `filter`, in catalog order
pub fn apply<'a>(catalog: &'a Catalog, filter: &dyn Filter) -> Vec<&'a PropertyRecord> {
    catalog.iter().filter(|r| filter.matches(r)).collect()
}
