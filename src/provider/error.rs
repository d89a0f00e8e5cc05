use thiserror::Error;

/// Errors surfaced by a search provider call.
///
/// All variants are recoverable at the engine layer: search degrades to an
/// empty result set, suggestions degrade to the fallback list.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("provider call timed out after {budget_secs}s")]
    Timeout { budget_secs: u64 },

    #[error("provider returned a malformed response: {reason}")]
    BadResponse { reason: String },
}

impl ProviderError {
    /// Returns `true` for failures worth a single retry (network-side).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::Unavailable { .. } | ProviderError::Timeout { .. }
        )
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
