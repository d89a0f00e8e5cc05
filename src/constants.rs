//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary values from these rather than restating them in
//! module-local copies.

/// Default embedding dimension (BERT-family sentence encoders).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Default max tokens considered per text.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Default number of candidates requested from the provider.
pub const DEFAULT_FETCH_LIMIT: usize = 10;

/// Hard cap on candidates per fetch, regardless of caller-requested limit.
pub const MAX_FETCH_LIMIT: usize = 20;

/// Default number of ranked results returned to the consumer.
pub const DEFAULT_TOP_K: usize = 5;

/// Default prefix length (chars) of a document body that gets embedded.
///
/// Embedding the full body is a quality/latency trade-off, not a correctness
/// requirement; the prefix length is tunable via configuration.
pub const DEFAULT_EMBED_PREFIX_CHARS: usize = 300;

/// Default TTL for cached ranked results.
pub const DEFAULT_RESULT_TTL_SECS: u64 = 300;

/// Default TTL for cached suggestions.
pub const DEFAULT_SUGGESTION_TTL_SECS: u64 = 600;

/// Default max entries per cache (LRU bound on top of TTL).
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Default provider call budget.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
