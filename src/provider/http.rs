//! HTTP search provider (SearxNG-style JSON API).

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use super::error::{ProviderError, ProviderResult};
use super::{CandidateDocument, SearchOptions, SearchProvider};

/// Search provider backed by a SearxNG-compatible HTTP endpoint.
///
/// Cloning is cheap (the underlying `reqwest::Client` is reference-counted),
/// so the same provider can back both the fetch and suggestion pipelines.
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    /// SearxNG calls the snippet `content`.
    #[serde(default)]
    content: String,
}

impl HttpSearchProvider {
    /// Creates a provider for `base_url` with a per-call `timeout` budget.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Unavailable {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Returns the configured provider base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                budget_secs: self.timeout.as_secs(),
            }
        } else {
            ProviderError::Unavailable {
                reason: err.to_string(),
            }
        }
    }

    fn check_status(&self, status: reqwest::StatusCode) -> ProviderResult<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(ProviderError::Unavailable {
                reason: format!("provider returned HTTP {status}"),
            })
        }
    }
}

impl SearchProvider for HttpSearchProvider {
    #[instrument(skip(self), fields(base_url = %self.base_url, query_len = query.len()))]
    async fn search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> ProviderResult<Vec<CandidateDocument>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query),
                ("format", "json"),
                ("safesearch", options.safety.as_provider_param()),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        self.check_status(response.status())?;

        let body: SearchResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::BadResponse {
                    reason: e.to_string(),
                })?;

        let candidates = collect_candidates(body, options.max_results);
        debug!(candidates = candidates.len(), "Provider search complete");

        Ok(candidates)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url, query_len = query.len()))]
    async fn suggest(&self, query: &str) -> ProviderResult<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/autocompleter", self.base_url))
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        self.check_status(response.status())?;

        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| ProviderError::BadResponse {
                    reason: e.to_string(),
                })?;

        parse_suggestions(&body)
    }
}

fn collect_candidates(body: SearchResponse, max_results: usize) -> Vec<CandidateDocument> {
    body.results
        .into_iter()
        .filter(|hit| !hit.url.is_empty())
        .take(max_results)
        .map(|hit| CandidateDocument {
            title: hit.title,
            url: hit.url,
            body: hit.content,
        })
        .collect()
}

/// Parses the OpenSearch autocomplete shape: `["query", ["a", "b", ...]]`.
fn parse_suggestions(body: &serde_json::Value) -> ProviderResult<Vec<String>> {
    let phrases = body
        .as_array()
        .and_then(|parts| parts.get(1))
        .and_then(|p| p.as_array())
        .ok_or_else(|| ProviderError::BadResponse {
            reason: "expected [query, [suggestions...]]".to_string(),
        })?;

    Ok(phrases
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect())
}
