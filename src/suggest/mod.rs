//! Related-query suggestions.
//!
//! Same embedding+similarity mechanism as result ranking, applied against a
//! corpus of candidate phrases. The corpus source is injected — a fixed
//! curated list or the provider's own suggestion endpoint — never hardwired.
//! Suggestion failure is different from search failure: the consumer always
//! gets a non-empty list, falling back to a deterministic set.

mod error;


pub use error::SuggestError;

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::embedding::TextEncoder;
use crate::engine::Query;
use crate::provider::{ProviderResult, SearchProvider};
use crate::ranking::cosine_similarity;

/// One related-query suggestion, scored by closeness to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub score: f32,
}

/// Supplies the raw phrase corpus that suggestions are ranked from.
pub trait SuggestionSource: Send + Sync {
    fn corpus(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = ProviderResult<Vec<String>>> + Send;
}

/// Fixed curated phrase list.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpus {
    phrases: Vec<String>,
}

impl StaticCorpus {
    pub fn new(phrases: Vec<String>) -> Self {
        Self { phrases }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl SuggestionSource for StaticCorpus {
    async fn corpus(&self, _query: &str) -> ProviderResult<Vec<String>> {
        Ok(self.phrases.clone())
    }
}

/// Corpus sourced from the provider's suggestion endpoint.
#[derive(Debug, Clone)]
pub struct ProviderSuggestions<P: SearchProvider> {
    provider: P,
}

impl<P: SearchProvider> ProviderSuggestions<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: SearchProvider> SuggestionSource for ProviderSuggestions<P> {
    async fn corpus(&self, query: &str) -> ProviderResult<Vec<String>> {
        self.provider.suggest(query).await
    }
}

/// Query-refinement templates used when the corpus cannot be ranked.
const FALLBACK_REFINEMENTS: [&str; 4] = ["overview", "tutorial", "examples", "vs alternatives"];

/// Phrases shown when even the query text is empty.
const FALLBACK_PHRASES: [&str; 4] = [
    "trending topics",
    "latest news",
    "getting started",
    "popular searches",
];

/// Ranks corpus phrases by semantic closeness to the query.
pub struct SuggestionEngine<S: SuggestionSource> {
    source: S,
    encoder: Arc<TextEncoder>,
}

impl<S: SuggestionSource> std::fmt::Debug for SuggestionEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl<S: SuggestionSource> SuggestionEngine<S> {
    pub fn new(source: S, encoder: Arc<TextEncoder>) -> Self {
        Self { source, encoder }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the `k` corpus phrases nearest to the query.
    ///
    /// Errors describe why ranking was impossible; callers that need the
    /// never-empty consumer behavior use [`suggest`](Self::suggest).
    pub async fn try_suggest(&self, query: &Query, k: usize) -> Result<Vec<Suggestion>, SuggestError> {
        let corpus = self.source.corpus(query.text()).await?;

        if corpus.is_empty() {
            return Err(SuggestError::EmptyCorpus);
        }

        // One batch: query first, then the whole corpus.
        let mut texts: Vec<&str> = Vec::with_capacity(corpus.len() + 1);
        texts.push(query.text());
        texts.extend(corpus.iter().map(String::as_str));

        let mut vectors = self.encoder.encode(&texts)?;
        let query_vec = vectors.remove(0);

        let mut scored: Vec<Suggestion> = corpus
            .into_iter()
            .zip(vectors)
            .map(|(text, vector)| Suggestion {
                score: cosine_similarity(&query_vec, &vector),
                text,
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        debug!(suggestions = scored.len(), "Suggestion ranking complete");

        Ok(scored)
    }

    /// Returns the `k` nearest suggestions, degrading to the deterministic
    /// fallback list on any failure. Never returns an empty list for `k > 0`.
    pub async fn suggest(&self, query: &Query, k: usize) -> Vec<Suggestion> {
        match self.try_suggest(query, k).await {
            Ok(suggestions) if !suggestions.is_empty() => suggestions,
            Ok(_) => fallback_suggestions(query.text(), k),
            Err(err) => {
                warn!(error = %err, "Suggestion ranking degraded to fallback list");
                fallback_suggestions(query.text(), k)
            }
        }
    }
}

/// Deterministic fallback: query refinements when a query exists, fixed
/// phrases otherwise. Scores are zero — the fallback encodes no similarity.
pub fn fallback_suggestions(query_text: &str, k: usize) -> Vec<Suggestion> {
    let query_text = query_text.trim();

    let texts: Vec<String> = if query_text.is_empty() {
        FALLBACK_PHRASES.iter().map(|p| p.to_string()).collect()
    } else {
        FALLBACK_REFINEMENTS
            .iter()
            .map(|suffix| format!("{query_text} {suffix}"))
            .collect()
    };

    texts
        .into_iter()
        .take(k)
        .map(|text| Suggestion { text, score: 0.0 })
        .collect()
}
