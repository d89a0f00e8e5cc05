//! Similarity ranking of embedded candidates.
//!
//! The one algorithmic core of the engine: cosine similarity against the
//! query vector, stable descending sort, top-k truncation. Determinism is a
//! hard requirement here; anything cosmetic (shuffling, fake confidence)
//! belongs to presentation layers, not this module.

#[cfg(test)]
mod tests;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::DEFAULT_TOP_K;
use crate::provider::CandidateDocument;

/// One ranked search result. `score` is the cosine similarity to the query,
/// in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub document: CandidateDocument,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct RankerConfig {
    /// Default result count when the caller does not specify `k`.
    pub top_k: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Orders candidates by semantic closeness to the query.
#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    config: RankerConfig,
}

impl RelevanceRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Returns the default result count.
    pub fn default_top_k(&self) -> usize {
        self.config.top_k
    }

    /// Ranks `candidates` against `query_vec` and returns the top `k`.
    ///
    /// Scores are cosine similarities; the sort is stable, so candidates with
    /// identical similarity keep their original fetch order. Always returns
    /// `min(k, candidates.len())` results.
    pub fn rank(
        &self,
        query_vec: &[f32],
        candidates: Vec<(CandidateDocument, Vec<f32>)>,
        k: usize,
    ) -> Vec<RankedResult> {
        if candidates.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<RankedResult> = candidates
            .into_iter()
            .map(|(document, vector)| RankedResult {
                score: cosine_similarity(query_vec, &vector),
                document,
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        debug!(
            returned = scored.len(),
            best_score = scored.first().map(|r| r.score),
            "Ranking complete"
        );

        scored
    }
}

/// Cosine similarity between two vectors.
///
/// Returns `0.0` when either vector has zero norm (degenerate/empty text) or
/// when the lengths disagree, rather than dividing by zero.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Returns the prefix of `text` that gets embedded, bounded to `max_chars`
/// characters (char-boundary safe).
///
/// Embedding only a bounded prefix of long bodies is a deliberate
/// performance/quality trade-off; the bound comes from configuration.
pub fn embed_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
