use std::sync::Arc;

use crate::cache::ResultCache;
use crate::embedding::{EmbeddingError, EncoderConfig, TextEncoder};
use crate::filter::ContentFilter;
use crate::ranking::RankedResult;
use crate::suggest::Suggestion;

/// Shared, construct-once engine state: the encoder, the content filter and
/// the two memoization caches.
///
/// The encoder is the one expensive resource (it holds model weights); the
/// context is built exactly once at startup and threaded through the engine
/// by reference — there is no ambient global. Construction fails only on
/// encoder initialization failure, which is fatal by design.
pub struct EngineContext {
    encoder: Arc<TextEncoder>,
    filter: ContentFilter,
    results: ResultCache<Vec<RankedResult>>,
    suggestions: ResultCache<Vec<Suggestion>>,
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("encoder", &self.encoder)
            .field("filter_terms", &self.filter.term_count())
            .field("cached_results", &self.results.len())
            .field("cached_suggestions", &self.suggestions.len())
            .finish()
    }
}

impl EngineContext {
    /// Builds the context, loading the encoder exactly once.
    pub fn new(
        encoder_config: EncoderConfig,
        filter: ContentFilter,
        cache_capacity: u64,
    ) -> Result<Self, EmbeddingError> {
        let encoder = Arc::new(TextEncoder::load(encoder_config)?);

        Ok(Self {
            encoder,
            filter,
            results: ResultCache::with_capacity(cache_capacity),
            suggestions: ResultCache::with_capacity(cache_capacity),
        })
    }

    /// A context with a stub encoder and no filtering (tests, model-less runs).
    pub fn stub() -> Self {
        Self::new(EncoderConfig::stub(), ContentFilter::allow_all(), 1024)
            .expect("stub encoder construction cannot fail")
    }

    pub fn encoder(&self) -> &TextEncoder {
        &self.encoder
    }

    /// Shared handle to the encoder (for the suggestion pipeline).
    pub fn encoder_arc(&self) -> Arc<TextEncoder> {
        Arc::clone(&self.encoder)
    }

    pub fn filter(&self) -> &ContentFilter {
        &self.filter
    }

    pub fn results_cache(&self) -> &ResultCache<Vec<RankedResult>> {
        &self.results
    }

    pub fn suggestions_cache(&self) -> &ResultCache<Vec<Suggestion>> {
        &self.suggestions
    }
}
