use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::ranking::RankedResult;

/// A normalized free-text query: trimmed, case preserved, stamped at
/// issuance. Immutable once created.
#[derive(Debug, Clone)]
pub struct Query {
    text: String,
    issued_at: Instant,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.trim().to_string(),
            issued_at: Instant::now(),
        }
    }

    /// The normalized query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// When the query was issued.
    pub fn issued_at(&self) -> Instant {
        self.issued_at
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// How a search outcome was produced.
///
/// Transient failures are invisible to end users — they see fewer or
/// unranked results, never an error — but the status keeps the degradation
/// paths distinguishable for callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStatus {
    /// Candidates were fetched, filtered, embedded and ranked.
    Ranked,
    /// Encoding failed; results are in original fetch order, unscored.
    Unranked,
    /// The provider was unreachable; results are empty.
    ProviderUnavailable,
}

impl RetrievalStatus {
    /// Stable string form (also used as an HTTP status header value).
    pub fn as_str(self) -> &'static str {
        match self {
            RetrievalStatus::Ranked => "ranked",
            RetrievalStatus::Unranked => "unranked",
            RetrievalStatus::ProviderUnavailable => "provider_unavailable",
        }
    }
}

/// Ranked results plus how they were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: Vec<RankedResult>,
    pub status: RetrievalStatus,
}

impl SearchOutcome {
    pub fn ranked(results: Vec<RankedResult>) -> Self {
        Self {
            results,
            status: RetrievalStatus::Ranked,
        }
    }

    pub fn unranked(results: Vec<RankedResult>) -> Self {
        Self {
            results,
            status: RetrievalStatus::Unranked,
        }
    }

    pub fn provider_unavailable() -> Self {
        Self {
            results: Vec::new(),
            status: RetrievalStatus::ProviderUnavailable,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status != RetrievalStatus::Ranked
    }
}
