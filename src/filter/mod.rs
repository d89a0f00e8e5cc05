//! Disallowed-term content filtering.
//!
//! The term list is compiled once into a single case-insensitive whole-word
//! matcher; `is_allowed` runs per candidate and must not recompile.


use regex::RegexBuilder;
use thiserror::Error;
use tracing::debug;

use crate::provider::CandidateDocument;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("failed to compile disallowed-term matcher: {source}")]
    CompileFailed {
        #[source]
        source: regex::Error,
    },
}

/// Document-level filter over a configured disallowed-term set.
///
/// A document is kept only if neither its title nor its body matches any
/// disallowed term. Rejection is document-level, never partial redaction.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    matcher: Option<regex::Regex>,
    term_count: usize,
}

impl ContentFilter {
    /// Compiles the disallowed-term list. An empty list allows everything.
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self, FilterError> {
        let terms: Vec<&str> = terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .collect();

        if terms.is_empty() {
            return Ok(Self {
                matcher: None,
                term_count: 0,
            });
        }

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"\b(?:{alternation})\b");

        let matcher = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| FilterError::CompileFailed { source })?;

        debug!(terms = terms.len(), "Compiled disallowed-term matcher");

        Ok(Self {
            matcher: Some(matcher),
            term_count: terms.len(),
        })
    }

    /// A filter that allows everything.
    pub fn allow_all() -> Self {
        Self {
            matcher: None,
            term_count: 0,
        }
    }

    /// Returns the number of compiled terms.
    pub fn term_count(&self) -> usize {
        self.term_count
    }

    /// Returns `true` if `text` matches no disallowed term.
    pub fn is_allowed(&self, text: &str) -> bool {
        match &self.matcher {
            Some(matcher) => !matcher.is_match(text),
            None => true,
        }
    }

    /// Returns `true` if both the document title and body are allowed.
    pub fn is_document_allowed(&self, document: &CandidateDocument) -> bool {
        self.is_allowed(&document.title) && self.is_allowed(&document.body)
    }

    /// Drops disallowed documents, preserving the order of the rest.
    pub fn retain_allowed(&self, documents: Vec<CandidateDocument>) -> Vec<CandidateDocument> {
        if self.matcher.is_none() {
            return documents;
        }

        let before = documents.len();
        let kept: Vec<CandidateDocument> = documents
            .into_iter()
            .filter(|doc| self.is_document_allowed(doc))
            .collect();

        if kept.len() < before {
            debug!(dropped = before - kept.len(), "Filtered disallowed candidates");
        }

        kept
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::allow_all()
    }
}
