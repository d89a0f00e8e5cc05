//! The retrieval engine: fetch, filter, embed, rank, suggest, memoize.
//!
//! [`RetrievalEngine::search_and_rank`] and
//! [`RetrievalEngine::get_suggestions`] are the only two entry points the
//! rest of an application needs; [`RetrievalEngine::query`] runs both
//! pipelines concurrently for one query.

mod context;
mod types;


pub use context::EngineContext;
pub use types::{Query, RetrievalStatus, SearchOutcome};

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::constants::{
    DEFAULT_EMBED_PREFIX_CHARS, DEFAULT_FETCH_LIMIT, DEFAULT_RESULT_TTL_SECS,
    DEFAULT_SUGGESTION_TTL_SECS,
};
use crate::fetch::CandidateFetcher;
use crate::provider::{SafetyLevel, SearchProvider};
use crate::ranking::{RankedResult, RelevanceRanker, embed_prefix};
use crate::suggest::{Suggestion, SuggestionEngine, SuggestionSource};

/// Engine tuning knobs, usually derived from [`Config`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Candidates requested from the provider per query.
    pub fetch_limit: usize,
    /// Provider-side content safety level.
    pub safety: SafetyLevel,
    /// Chars of a document body embedded for ranking.
    pub embed_prefix_chars: usize,
    /// TTL for cached ranked results.
    pub result_ttl: Duration,
    /// TTL for cached suggestions.
    pub suggestion_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            safety: SafetyLevel::default(),
            embed_prefix_chars: DEFAULT_EMBED_PREFIX_CHARS,
            result_ttl: Duration::from_secs(DEFAULT_RESULT_TTL_SECS),
            suggestion_ttl: Duration::from_secs(DEFAULT_SUGGESTION_TTL_SECS),
        }
    }
}

impl From<&Config> for EngineConfig {
    fn from(config: &Config) -> Self {
        Self {
            fetch_limit: config.fetch_limit,
            safety: config.safety_level,
            embed_prefix_chars: config.embed_prefix_chars,
            result_ttl: config.result_ttl,
            suggestion_ttl: config.suggestion_ttl,
        }
    }
}

/// Semantic retrieval-and-ranking engine.
///
/// Request-scoped: queries are independent units of work with no cross-query
/// ordering. All shared state lives in the [`EngineContext`]; candidate
/// documents and embedding vectors are immutable once produced, so
/// concurrent queries need no coordination.
pub struct RetrievalEngine<P: SearchProvider, S: SuggestionSource> {
    context: EngineContext,
    fetcher: CandidateFetcher<P>,
    suggester: SuggestionEngine<S>,
    ranker: RelevanceRanker,
    config: EngineConfig,
}

impl<P: SearchProvider, S: SuggestionSource> std::fmt::Debug for RetrievalEngine<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalEngine")
            .field("context", &self.context)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<P: SearchProvider, S: SuggestionSource> RetrievalEngine<P, S> {
    pub fn new(context: EngineContext, provider: P, source: S, config: EngineConfig) -> Self {
        let fetcher = CandidateFetcher::new(provider, config.fetch_limit);
        let suggester = SuggestionEngine::new(source, context.encoder_arc());

        Self {
            context,
            fetcher,
            suggester,
            ranker: RelevanceRanker::new(),
            config,
        }
    }

    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetches, filters, embeds and ranks candidates for `raw_query`,
    /// returning the top `k`.
    ///
    /// Transient failures degrade instead of erroring: provider failure
    /// yields an empty outcome, encoding failure yields unranked results in
    /// fetch order. Only fully ranked outcomes are cached, so degraded
    /// queries heal on the next call.
    #[instrument(skip(self), fields(query_len = raw_query.len(), k = k))]
    pub async fn search_and_rank(&self, raw_query: &str, k: usize) -> SearchOutcome {
        // Raw text keys the cache; normalization is the caller's business.
        if let Some(mut results) = self.context.results_cache().get(raw_query) {
            debug!("Result cache hit");
            results.truncate(k);
            return SearchOutcome::ranked(results);
        }

        let query = Query::new(raw_query);

        let candidates = match self
            .fetcher
            .fetch(&query, self.config.fetch_limit, self.config.safety)
            .await
        {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, "Provider unavailable, returning empty results");
                return SearchOutcome::provider_unavailable();
            }
        };

        let fetched = candidates.len();
        let kept = self.context.filter().retain_allowed(candidates);

        if kept.is_empty() {
            debug!(fetched = fetched, "No candidates survived filtering");
            self.context.results_cache().insert(
                raw_query,
                Vec::new(),
                self.config.result_ttl,
            );
            return SearchOutcome::ranked(Vec::new());
        }

        // One batch: query first, then every candidate's bounded prefix.
        let mut texts: Vec<&str> = Vec::with_capacity(kept.len() + 1);
        texts.push(query.text());
        texts.extend(
            kept.iter()
                .map(|doc| embed_prefix(&doc.body, self.config.embed_prefix_chars)),
        );

        let mut vectors = match self.context.encoder().encode(&texts) {
            Ok(vectors) => vectors,
            Err(err) => {
                warn!(error = %err, "Encoding failed, returning unranked results");
                let mut results: Vec<RankedResult> = kept
                    .into_iter()
                    .map(|document| RankedResult {
                        document,
                        score: 0.0,
                    })
                    .collect();
                results.truncate(k);
                return SearchOutcome::unranked(results);
            }
        };

        let query_vec = vectors.remove(0);
        let candidate_count = kept.len();
        let pairs: Vec<_> = kept.into_iter().zip(vectors).collect();

        // Rank everything once; per-call k is applied on read so one cache
        // entry serves any requested depth.
        let ranked = self.ranker.rank(&query_vec, pairs, candidate_count);

        self.context
            .results_cache()
            .insert(raw_query, ranked.clone(), self.config.result_ttl);

        info!(
            fetched = fetched,
            ranked = ranked.len(),
            best_score = ranked.first().map(|r| r.score),
            "Search complete"
        );

        let mut results = ranked;
        results.truncate(k);
        SearchOutcome::ranked(results)
    }

    /// Returns the `k` suggestions nearest to `raw_query`.
    ///
    /// Never empty for `k > 0`: failures fall back to the deterministic
    /// list. Fallback outcomes are not cached.
    #[instrument(skip(self), fields(query_len = raw_query.len(), k = k))]
    pub async fn get_suggestions(&self, raw_query: &str, k: usize) -> Vec<Suggestion> {
        if let Some(mut suggestions) = self.context.suggestions_cache().get(raw_query) {
            debug!("Suggestion cache hit");
            suggestions.truncate(k);
            return suggestions;
        }

        let query = Query::new(raw_query);

        match self.suggester.try_suggest(&query, usize::MAX).await {
            Ok(ranked) => {
                self.context.suggestions_cache().insert(
                    raw_query,
                    ranked.clone(),
                    self.config.suggestion_ttl,
                );
                let mut suggestions = ranked;
                suggestions.truncate(k);
                suggestions
            }
            Err(err) => {
                warn!(error = %err, "Suggestion ranking degraded to fallback list");
                crate::suggest::fallback_suggestions(query.text(), k)
            }
        }
    }

    /// Runs the search and suggestion pipelines concurrently for one query.
    ///
    /// The two pipelines are independent (no producer-consumer dependency),
    /// so this is a plain join, not an ordering construct.
    pub async fn query(&self, raw_query: &str, k: usize) -> (SearchOutcome, Vec<Suggestion>) {
        tokio::join!(
            self.search_and_rank(raw_query, k),
            self.get_suggestions(raw_query, k)
        )
    }
}
