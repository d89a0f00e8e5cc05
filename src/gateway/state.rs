use std::sync::Arc;

use crate::engine::RetrievalEngine;
use crate::provider::SearchProvider;
use crate::suggest::SuggestionSource;

/// Shared handler state: one engine behind an `Arc`.
pub struct HandlerState<P: SearchProvider + 'static, S: SuggestionSource + 'static> {
    pub engine: Arc<RetrievalEngine<P, S>>,
}

impl<P: SearchProvider + 'static, S: SuggestionSource + 'static> Clone for HandlerState<P, S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<P: SearchProvider + 'static, S: SuggestionSource + 'static> HandlerState<P, S> {
    pub fn new(engine: Arc<RetrievalEngine<P, S>>) -> Self {
        Self { engine }
    }
}
