//! Evidence retrieval for extracted claims.
//!
//! Two operating modes (credentialed search vs. reference fallback), a
//! mandatory source-domain allow-list, and an optional reachability pass.
//! Retrieval fails soft: network trouble yields fewer or zero snippets,
//! never an error.

pub mod domains;
pub mod fallback;
pub mod search;
pub mod validate;

use std::time::Duration;

use shared_types::EvidenceSnippet;

use crate::config::{EngineConfig, SearchMode};

/// Tag recording which evidence strategy actually produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationMethod {
    WebSearch,
    ReferenceFallback,
}

impl VerificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::WebSearch => "web-search-bing",
            VerificationMethod::ReferenceFallback => "web-search-fallback",
        }
    }
}

/// Evidence for one claim, in retrieval order.
#[derive(Debug, Clone)]
pub struct RetrievedEvidence {
    pub snippets: Vec<EvidenceSnippet>,
    pub method: VerificationMethod,
}

/// Obtains candidate evidence for one claim at a time. Holds no state
/// across invocations beyond the HTTP connection pool.
#[derive(Clone)]
pub struct EvidenceRetriever {
    client: reqwest::Client,
    mode: SearchMode,
    validate_evidence: bool,
    validation_timeout: Duration,
}

impl EvidenceRetriever {
    pub fn new(config: EngineConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("trustlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            mode: config.search,
            validate_evidence: config.validate_evidence,
            validation_timeout: config.validation_timeout,
        }
    }

    /// Gather evidence snippets for a claim. Allow-list filtering is
    /// unconditional; the reachability pass honors configuration.
    pub async fn retrieve(&self, claim: &str) -> RetrievedEvidence {
        let (candidates, method) = match &self.mode {
            SearchMode::ApiBacked { endpoint, api_key } => {
                match search::search_web(&self.client, endpoint, api_key, claim).await {
                    Ok(results) => (results, VerificationMethod::WebSearch),
                    Err(err) => {
                        tracing::warn!("search API unavailable, using reference links: {err}");
                        (
                            fallback::reference_snippets(claim),
                            VerificationMethod::ReferenceFallback,
                        )
                    }
                }
            }
            SearchMode::ReferenceFallback => (
                fallback::reference_snippets(claim),
                VerificationMethod::ReferenceFallback,
            ),
        };

        let allowed: Vec<EvidenceSnippet> = candidates
            .into_iter()
            .filter(|snippet| domains::is_allowed(&snippet.url))
            .collect();

        let snippets = if self.validate_evidence {
            validate::filter_reachable(&self.client, allowed, self.validation_timeout).await
        } else {
            allowed
        };

        RetrievedEvidence { snippets, method }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_method_tags() {
        assert_eq!(VerificationMethod::WebSearch.as_str(), "web-search-bing");
        assert_eq!(
            VerificationMethod::ReferenceFallback.as_str(),
            "web-search-fallback"
        );
    }

    #[tokio::test]
    async fn test_fallback_mode_without_validation_is_offline() {
        let retriever =
            EvidenceRetriever::new(EngineConfig::reference_fallback().without_validation());
        let retrieved = retriever.retrieve("The Earth orbits the Sun").await;

        assert_eq!(retrieved.method, VerificationMethod::ReferenceFallback);
        assert_eq!(retrieved.snippets.len(), 3);
        for snippet in &retrieved.snippets {
            assert!(domains::is_allowed(&snippet.url));
            assert!((0.0..=100.0).contains(&snippet.relevance_score));
        }
    }

    #[tokio::test]
    async fn test_fallback_snippet_order_is_stable() {
        let retriever =
            EvidenceRetriever::new(EngineConfig::reference_fallback().without_validation());
        let first = retriever.retrieve("Honey never spoils in storage").await;
        let second = retriever.retrieve("Honey never spoils in storage").await;

        let urls = |r: &RetrievedEvidence| {
            r.snippets.iter().map(|s| s.url.clone()).collect::<Vec<_>>()
        };
        assert_eq!(urls(&first), urls(&second));
    }
}
