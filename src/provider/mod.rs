//! Search provider boundary.
//!
//! The engine depends only on the [`SearchProvider`] shape; the concrete
//! provider is swappable. [`HttpSearchProvider`] speaks a SearxNG-style JSON
//! API. Mock support lives behind `#[cfg(any(test, feature = "mock"))]`.

mod error;
pub mod http;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use error::{ProviderError, ProviderResult};
pub use http::HttpSearchProvider;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockSearchProvider;

use serde::{Deserialize, Serialize};

/// One unranked search result returned by the provider, prior to
/// filtering/ranking. Identity is structural; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDocument {
    pub title: String,
    pub url: String,
    pub body: String,
}

/// Provider-side content safety level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Strict,
    #[default]
    Moderate,
    Off,
}

impl SafetyLevel {
    /// SearxNG `safesearch` query parameter value.
    pub fn as_provider_param(self) -> &'static str {
        match self {
            SafetyLevel::Strict => "2",
            SafetyLevel::Moderate => "1",
            SafetyLevel::Off => "0",
        }
    }
}

impl std::str::FromStr for SafetyLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SafetyLevel::Strict),
            "moderate" => Ok(SafetyLevel::Moderate),
            "off" => Ok(SafetyLevel::Off),
            _ => Err(()),
        }
    }
}

/// Options for a single provider search call.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Max results to request.
    pub max_results: usize,
    /// Content safety level.
    pub safety: SafetyLevel,
}

/// External search provider required by the fetch and suggestion pipelines.
pub trait SearchProvider: Send + Sync {
    /// Runs a search and returns candidate documents in provider order.
    fn search(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> impl std::future::Future<Output = ProviderResult<Vec<CandidateDocument>>> + Send;

    /// Returns raw phrase suggestions for a query (unranked).
    fn suggest(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = ProviderResult<Vec<String>>> + Send;
}
