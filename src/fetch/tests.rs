use super::*;
use crate::provider::{MockSearchProvider, ProviderError};

fn doc(title: &str) -> CandidateDocument {
    CandidateDocument {
        title: title.to_string(),
        url: format!("https://example.com/{title}"),
        body: format!("body of {title}"),
    }
}

fn docs(n: usize) -> Vec<CandidateDocument> {
    (0..n).map(|i| doc(&format!("doc-{i}"))).collect()
}

#[test]
fn test_max_results_clamped_to_hard_cap() {
    let fetcher = CandidateFetcher::new(MockSearchProvider::new(), 500);
    assert_eq!(fetcher.max_results(), MAX_FETCH_LIMIT);

    let fetcher = CandidateFetcher::new(MockSearchProvider::new(), 0);
    assert_eq!(fetcher.max_results(), 1);
}

#[tokio::test]
async fn test_fetch_returns_provider_order() {
    let provider = MockSearchProvider::with_documents(docs(3));
    let fetcher = CandidateFetcher::new(provider, 10);

    let query = Query::new("rust async");
    let candidates = fetcher.fetch(&query, 10, SafetyLevel::Moderate).await.unwrap();

    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0].title, "doc-0");
    assert_eq!(candidates[2].title, "doc-2");
}

#[tokio::test]
async fn test_fetch_clamps_requested_limit() {
    let provider = MockSearchProvider::with_documents(docs(8));
    let fetcher = CandidateFetcher::new(provider, 5);

    let query = Query::new("rust async");

    let candidates = fetcher.fetch(&query, 100, SafetyLevel::Off).await.unwrap();
    assert_eq!(candidates.len(), 5);

    let candidates = fetcher.fetch(&query, 0, SafetyLevel::Off).await.unwrap();
    assert_eq!(candidates.len(), 1);
}

#[tokio::test]
async fn test_fetch_retries_once_on_transient_failure() {
    let provider = MockSearchProvider::with_documents(docs(2));
    provider.fail_search_times(1);
    let fetcher = CandidateFetcher::new(provider.clone(), 10);

    let query = Query::new("rust async");
    let candidates = fetcher.fetch(&query, 10, SafetyLevel::Moderate).await.unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(provider.search_calls(), 2);
}

#[tokio::test]
async fn test_fetch_returns_typed_error_after_retry() {
    let provider = MockSearchProvider::new();
    provider.fail_search(true);
    let fetcher = CandidateFetcher::new(provider.clone(), 10);

    let query = Query::new("rust async");
    let result = fetcher.fetch(&query, 10, SafetyLevel::Moderate).await;

    assert!(matches!(result, Err(ProviderError::Unavailable { .. })));
    assert_eq!(provider.search_calls(), 2);
}
