//! Candidate fetch over an injected [`SearchProvider`].
//!
//! Pure I/O boundary; no ranking logic. Search is best-effort: the engine
//! treats fetch failure as recoverable and degrades to an empty result set.

#[cfg(test)]
mod tests;

use tracing::{debug, warn};

use crate::constants::MAX_FETCH_LIMIT;
use crate::engine::Query;
use crate::provider::{
    CandidateDocument, ProviderResult, SafetyLevel, SearchOptions, SearchProvider,
};

/// Fetches a bounded list of candidate documents for a query.
#[derive(Debug, Clone)]
pub struct CandidateFetcher<P: SearchProvider> {
    provider: P,
    max_results: usize,
}

impl<P: SearchProvider> CandidateFetcher<P> {
    /// Creates a fetcher. `max_results` caps every fetch and is itself capped
    /// at [`MAX_FETCH_LIMIT`].
    pub fn new(provider: P, max_results: usize) -> Self {
        Self {
            provider,
            max_results: max_results.clamp(1, MAX_FETCH_LIMIT),
        }
    }

    /// Returns the effective per-fetch cap.
    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches up to `limit` candidates (clamped to `[1, max_results]`) in
    /// provider order. Network-side failures get a single retry before the
    /// typed error is returned.
    pub async fn fetch(
        &self,
        query: &Query,
        limit: usize,
        safety: SafetyLevel,
    ) -> ProviderResult<Vec<CandidateDocument>> {
        let options = SearchOptions {
            max_results: limit.clamp(1, self.max_results),
            safety,
        };

        match self.provider.search(query.text(), options).await {
            Ok(candidates) => {
                debug!(candidates = candidates.len(), "Candidate fetch complete");
                Ok(candidates)
            }
            Err(err) if err.is_retryable() => {
                warn!(error = %err, "Provider search failed, retrying once");
                self.provider.search(query.text(), options).await
            }
            Err(err) => Err(err),
        }
    }
}
