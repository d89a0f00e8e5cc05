//! Lodestar library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! The consumer-facing entry points are
//! [`RetrievalEngine::search_and_rank`] and
//! [`RetrievalEngine::get_suggestions`]; everything else exists to build and
//! wire an engine. The exports are organized by module:
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//! - [`RetrievalEngine`], [`EngineContext`], [`EngineConfig`] - The engine
//! - [`Query`], [`SearchOutcome`], [`RetrievalStatus`] - Query/result model
//!
//! ## Pipeline Components
//! - [`CandidateFetcher`], [`SearchProvider`], [`HttpSearchProvider`] - Fetch
//! - [`ContentFilter`] - Disallowed-term filtering
//! - [`TextEncoder`], [`EncoderConfig`] - Embedding
//! - [`RelevanceRanker`], [`RankedResult`], [`cosine_similarity`] - Ranking
//! - [`SuggestionEngine`], [`SuggestionSource`], [`Suggestion`] - Suggestions
//! - [`ResultCache`] - TTL + LRU memoization
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.
//!
//! [`RetrievalEngine::search_and_rank`]: engine::RetrievalEngine::search_and_rank
//! [`RetrievalEngine::get_suggestions`]: engine::RetrievalEngine::get_suggestions

pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod engine;
pub mod fetch;
pub mod filter;
pub mod gateway;
pub mod provider;
pub mod ranking;
pub mod suggest;

pub use cache::ResultCache;
pub use config::{Config, ConfigError};
pub use embedding::{
    ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EmbeddingError, EncoderConfig, TextEncoder,
};
pub use engine::{
    EngineConfig, EngineContext, Query, RetrievalEngine, RetrievalStatus, SearchOutcome,
};
pub use fetch::CandidateFetcher;
pub use filter::{ContentFilter, FilterError};
pub use gateway::{HandlerState, STATUS_HEADER, create_router_with_state};
pub use provider::{
    CandidateDocument, HttpSearchProvider, ProviderError, ProviderResult, SafetyLevel,
    SearchOptions, SearchProvider,
};
#[cfg(any(test, feature = "mock"))]
pub use provider::MockSearchProvider;
pub use ranking::{RankedResult, RankerConfig, RelevanceRanker, cosine_similarity, embed_prefix};
pub use suggest::{
    ProviderSuggestions, StaticCorpus, SuggestError, Suggestion, SuggestionEngine,
    SuggestionSource, fallback_suggestions,
};
