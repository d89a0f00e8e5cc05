//! In-memory mock provider for tests and provider-less deployments.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::error::{ProviderError, ProviderResult};
use super::{CandidateDocument, SearchOptions, SearchProvider};

/// Scripted [`SearchProvider`] with call counters and failure injection.
#[derive(Debug, Clone, Default)]
pub struct MockSearchProvider {
    inner: Arc<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    documents: Mutex<Vec<CandidateDocument>>,
    suggestions: Mutex<Vec<String>>,
    fail_search: AtomicBool,
    fail_search_remaining: AtomicUsize,
    fail_suggest: AtomicBool,
    search_calls: AtomicUsize,
    suggest_calls: AtomicUsize,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that returns the given documents in order.
    pub fn with_documents(documents: Vec<CandidateDocument>) -> Self {
        let mock = Self::new();
        *mock.inner.documents.lock() = documents;
        mock
    }

    pub fn set_documents(&self, documents: Vec<CandidateDocument>) {
        *self.inner.documents.lock() = documents;
    }

    pub fn set_suggestions(&self, suggestions: Vec<String>) {
        *self.inner.suggestions.lock() = suggestions;
    }

    /// Makes subsequent `search` calls fail with `Unavailable`.
    pub fn fail_search(&self, fail: bool) {
        self.inner.fail_search.store(fail, Ordering::SeqCst);
    }

    /// Makes only the next `n` `search` calls fail with `Unavailable`.
    pub fn fail_search_times(&self, n: usize) {
        self.inner.fail_search_remaining.store(n, Ordering::SeqCst);
    }

    /// Makes subsequent `suggest` calls fail with `Unavailable`.
    pub fn fail_suggest(&self, fail: bool) {
        self.inner.fail_suggest.store(fail, Ordering::SeqCst);
    }

    pub fn search_calls(&self) -> usize {
        self.inner.search_calls.load(Ordering::SeqCst)
    }

    pub fn suggest_calls(&self) -> usize {
        self.inner.suggest_calls.load(Ordering::SeqCst)
    }
}

impl SearchProvider for MockSearchProvider {
    async fn search(
        &self,
        _query: &str,
        options: SearchOptions,
    ) -> ProviderResult<Vec<CandidateDocument>> {
        self.inner.search_calls.fetch_add(1, Ordering::SeqCst);

        let transient = self
            .inner
            .fail_search_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if transient || self.inner.fail_search.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable {
                reason: "mock search failure".to_string(),
            });
        }

        let documents = self.inner.documents.lock();
        Ok(documents.iter().take(options.max_results).cloned().collect())
    }

    async fn suggest(&self, _query: &str) -> ProviderResult<Vec<String>> {
        self.inner.suggest_calls.fetch_add(1, Ordering::SeqCst);

        if self.inner.fail_suggest.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable {
                reason: "mock suggest failure".to_string(),
            });
        }

        Ok(self.inner.suggestions.lock().clone())
    }
}
