use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::provider::ProviderError;

/// Why suggestion ranking fell back to the deterministic list.
///
/// These never reach the consumer-facing API (which always returns
/// suggestions); they exist so callers and tests can distinguish the
/// degradation paths.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("suggestion corpus is empty")]
    EmptyCorpus,

    #[error("suggestion source failed: {0}")]
    SourceFailed(#[from] ProviderError),

    #[error("suggestion encoding failed: {0}")]
    EncodingFailed(#[from] EmbeddingError),
}
